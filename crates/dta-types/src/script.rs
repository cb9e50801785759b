//! Zone scripts: lists of conditions that must all hold, paired with
//! actions executed in order once they do.

use std::fmt;

use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

use crate::Coded;

/// Condition opcodes. `Unknown*` variants exist in the data but their
/// meaning has not been established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum ConditionKind {
    FirstEnter = 0x00,
    Enter = 0x01,
    BumpTile = 0x02,
    UseItem = 0x03,
    Walk = 0x04,
    TempVarEq = 0x05,
    RandVarEq = 0x06,
    RandVarGt = 0x07,
    RandVarLt = 0x08,
    EnterVehicle = 0x09,
    CheckTile = 0x0A,
    EnemyDead = 0x0B,
    AllEnemiesDead = 0x0C,
    HasItem = 0x0D,
    CheckQuestItem1 = 0x0E,
    CheckQuestItem2 = 0x0F,
    Unknown10 = 0x10,
    GameInProgress = 0x11,
    GameCompleted = 0x12,
    HealthLt = 0x13,
    HealthGt = 0x14,
    Unknown15 = 0x15,
    Unknown16 = 0x16,
    UseWrongItem = 0x17,
    PlayerAtPos = 0x18,
    GlobalVarEq = 0x19,
    GlobalVarLt = 0x1A,
    GlobalVarGt = 0x1B,
    ExperienceEq = 0x1C,
    Unknown1D = 0x1D,
    Unknown1E = 0x1E,
    TempVarNe = 0x1F,
    RandVarNe = 0x20,
    GlobalVarNe = 0x21,
    CheckTileVar = 0x22,
    ExperienceGt = 0x23,
}

impl ConditionKind {
    pub fn from_code(code: u8) -> Coded<Self> {
        Coded::from_code(u16::from(code), |c| u8::try_from(c).ok().and_then(Self::from_repr))
    }

    /// Short mnemonic used when printing scripts.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::FirstEnter => "FirstEnter",
            Self::Enter => "ZoneEnter",
            Self::BumpTile => "BumpTile",
            Self::UseItem => "UseItem",
            Self::Walk => "TileWalk",
            Self::TempVarEq => "TVar_EQ",
            Self::RandVarEq => "RVar_EQ",
            Self::RandVarGt => "RVar_GT",
            Self::RandVarLt => "RVar_LT",
            Self::EnterVehicle => "EnterVehicle",
            Self::CheckTile => "CheckTile",
            Self::EnemyDead => "CrtrDead",
            Self::AllEnemiesDead => "AllDead",
            Self::HasItem => "HasItem",
            Self::CheckQuestItem1 => "Item1Is",
            Self::CheckQuestItem2 => "Item2Is",
            Self::Unknown10 => "Unkwn10",
            Self::GameInProgress => "MainQuestOpen",
            Self::GameCompleted => "MainQuestDone",
            Self::HealthLt => "Life_LT",
            Self::HealthGt => "Life_GT",
            Self::Unknown15 => "Unkwn15",
            Self::Unknown16 => "Unkwn16",
            Self::UseWrongItem => "WrongItem",
            Self::PlayerAtPos => "PlyrAtPos",
            Self::GlobalVarEq => "GVar_EQ",
            Self::GlobalVarLt => "GVar_LT",
            Self::GlobalVarGt => "GVar_GT",
            Self::ExperienceEq => "Wins_EQ",
            Self::Unknown1D => "Unkwn1d",
            Self::Unknown1E => "Unkwn1e",
            Self::TempVarNe => "TVar_NE",
            Self::RandVarNe => "RVar_NE",
            Self::GlobalVarNe => "GVar_NE",
            Self::CheckTileVar => "CheckTileVar",
            Self::ExperienceGt => "Wins_GT",
        }
    }
}

/// Action opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum ActionKind {
    SetTile = 0x00,
    ClearTile = 0x01,
    MoveTile = 0x02,
    DrawOverlayTile = 0x03,
    PlayerSay = 0x04,
    CreatureSay = 0x05,
    RedrawTile = 0x06,
    RedrawRect = 0x07,
    RenderChanges = 0x08,
    WaitTicks = 0x09,
    PlaySound = 0x0A,
    FadeIn = 0x0B,
    RandomNum = 0x0C,
    SetTempVar = 0x0D,
    AddTempVar = 0x0E,
    SetTileVar = 0x0F,
    ReleaseCamera = 0x10,
    LockCamera = 0x11,
    SetPlayerPos = 0x12,
    MoveCamera = 0x13,
    RunOnlyOnce = 0x14,
    ShowObject = 0x15,
    HideObject = 0x16,
    ShowEntity = 0x17,
    HideEntity = 0x18,
    ShowAllEntities = 0x19,
    HideAllEntities = 0x1A,
    SpawnItem = 0x1B,
    GiveToPlayer = 0x1C,
    TakeFromPlayer = 0x1D,
    OpenOrShow = 0x1E,
    Unknown1F = 0x1F,
    Unknown20 = 0x20,
    GoToZone = 0x21,
    SetGlobalVar = 0x22,
    AddGlobalVar = 0x23,
    SetRandVar = 0x24,
    AddToHealth = 0x25,
}

impl ActionKind {
    pub fn from_code(code: u8) -> Coded<Self> {
        Coded::from_code(u16::from(code), |c| u8::try_from(c).ok().and_then(Self::from_repr))
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::SetTile => "SetTile",
            Self::ClearTile => "ClearTile",
            Self::MoveTile => "MoveTile",
            Self::DrawOverlayTile => "DrawOver",
            Self::PlayerSay => "PlyrSez",
            Self::CreatureSay => "CrtrSez",
            Self::RedrawTile => "DrawTile",
            Self::RedrawRect => "DrawRect",
            Self::RenderChanges => "DrawAll",
            Self::WaitTicks => "WaitFor",
            Self::PlaySound => "PlaySound",
            Self::FadeIn => "FadeIn",
            Self::RandomNum => "RVarRange",
            Self::SetTempVar => "SetTVar",
            Self::AddTempVar => "AddTVar",
            Self::SetTileVar => "SetTileVar",
            Self::ReleaseCamera => "FreeCam",
            Self::LockCamera => "LockCam",
            Self::SetPlayerPos => "SetPlyrPos",
            Self::MoveCamera => "MoveCam",
            Self::RunOnlyOnce => "RunOnce",
            Self::ShowObject => "ShowObj",
            Self::HideObject => "HideObj",
            Self::ShowEntity => "ShowCrtr",
            Self::HideEntity => "HideCrtr",
            Self::ShowAllEntities => "ShowAll",
            Self::HideAllEntities => "HideAll",
            Self::SpawnItem => "SpawnItem",
            Self::GiveToPlayer => "GiveItem",
            Self::TakeFromPlayer => "TakeItem",
            Self::OpenOrShow => "OpenOrShow",
            Self::Unknown1F => "Unkwn1f",
            Self::Unknown20 => "Unkwn20",
            Self::GoToZone => "GoToZone",
            Self::SetGlobalVar => "SetGVar",
            Self::AddGlobalVar => "AddGVar",
            Self::SetRandVar => "SetRVar",
            Self::AddToHealth => "AddLife",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerCondition {
    pub kind: Coded<ConditionKind>,
    pub args: [u16; 6],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerAction {
    pub kind: Coded<ActionKind>,
    pub args: [u16; 5],
    /// Trailing text (dialogue, mostly). `None` when the length field is zero.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ActionTrigger {
    pub conditions: Vec<TriggerCondition>,
    pub actions: Vec<TriggerAction>,
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[u16]) -> fmt::Result {
    for arg in args {
        write!(f, ",{arg}")?;
    }
    Ok(())
}

impl fmt::Display for TriggerCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Coded::Known(kind) => f.write_str(kind.mnemonic())?,
            Coded::Unrecognized(code) => write!(f, "Cond{code:#04x}")?,
        }
        write_args(f, &self.args)
    }
}

impl fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Coded::Known(kind) => f.write_str(kind.mnemonic())?,
            Coded::Unrecognized(code) => write!(f, "Act{code:#04x}")?,
        }
        write_args(f, &self.args)?;
        write!(f, ",{}", self.text.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for ActionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            let lead = if i == 0 { "When " } else { "\n and " };
            write!(f, "{lead}{condition}")?;
        }
        writeln!(f, "...")?;
        for action in &self.actions {
            writeln!(f, "   - {action}")?;
        }
        Ok(())
    }
}
