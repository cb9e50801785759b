//! Decoder for one serialized action trigger (the payload of an `IACT` block).

use dta_types::{ActionKind, ActionTrigger, ConditionKind, TriggerAction, TriggerCondition};

use crate::error::DecodeError;
use crate::reader::Reader;

/// Type byte, one padding byte, six `u16` arguments.
pub const CONDITION_RECORD_LEN: usize = 14;
/// Fixed part of an action: type byte, padding, five arguments, text length.
pub const ACTION_HEADER_LEN: usize = 14;

fn read_condition(r: &mut Reader<'_>) -> Result<TriggerCondition, DecodeError> {
    let mut rec = r.sub_reader(CONDITION_RECORD_LEN)?;
    let kind = ConditionKind::from_code(rec.read_u8()?);
    rec.skip(1)?;
    let mut args = [0u16; 6];
    for arg in &mut args {
        *arg = rec.read_u16()?;
    }
    Ok(TriggerCondition { kind, args })
}

fn read_action(r: &mut Reader<'_>) -> Result<TriggerAction, DecodeError> {
    let mut rec = r.sub_reader(ACTION_HEADER_LEN)?;
    let kind = ActionKind::from_code(rec.read_u8()?);
    rec.skip(1)?;
    let mut args = [0u16; 5];
    for arg in &mut args {
        *arg = rec.read_u16()?;
    }
    let text_len = usize::from(rec.read_u16()?);
    let text = match text_len {
        0 => None,
        n => Some(r.read_text(n)?),
    };
    Ok(TriggerAction { kind, args, text })
}

/// Decode a condition list followed by an action list.
pub fn decode_trigger(r: &mut Reader<'_>) -> Result<ActionTrigger, DecodeError> {
    let condition_count = usize::from(r.read_u16()?);
    let mut conditions = Vec::with_capacity(condition_count.min(r.remaining() / CONDITION_RECORD_LEN));
    for _ in 0..condition_count {
        conditions.push(read_condition(r)?);
    }

    let action_count = usize::from(r.read_u16()?);
    let mut actions = Vec::with_capacity(action_count.min(r.remaining() / ACTION_HEADER_LEN));
    for _ in 0..action_count {
        actions.push(read_action(r)?);
    }

    for condition in &conditions {
        if !condition.kind.is_known() {
            log::warn!("unrecognised trigger condition {:?}", condition.kind);
        }
    }
    for action in &actions {
        if !action.kind.is_known() {
            log::warn!("unrecognised trigger action {:?}", action.kind);
        }
    }

    Ok(ActionTrigger {
        conditions,
        actions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dta_types::Coded;

    fn condition(kind: u8, args: [u16; 6]) -> Vec<u8> {
        let mut out = vec![kind, 0];
        for a in args {
            out.extend(a.to_le_bytes());
        }
        out
    }

    fn action(kind: u8, args: [u16; 5], text: &str) -> Vec<u8> {
        let mut out = vec![kind, 0];
        for a in args {
            out.extend(a.to_le_bytes());
        }
        out.extend((text.len() as u16).to_le_bytes());
        out.extend(text.as_bytes());
        out
    }

    #[test]
    fn two_conditions_one_action_consumes_46_bytes() {
        let mut blob = 2u16.to_le_bytes().to_vec();
        blob.extend(condition(0x00, [0; 6]));
        blob.extend(condition(0x0D, [422, 1, 2, 3, 4, 5]));
        blob.extend(1u16.to_le_bytes());
        blob.extend(action(0x21, [5, 6, 7, 8, 9], ""));
        blob.extend([0xAA; 3]);

        let mut r = Reader::new(&blob);
        let trigger = decode_trigger(&mut r).unwrap();
        assert_eq!(r.position(), 46);
        assert_eq!(trigger.conditions.len(), 2);
        assert_eq!(trigger.actions.len(), 1);
        assert_eq!(trigger.conditions[1].kind, Coded::Known(ConditionKind::HasItem));
        assert_eq!(trigger.conditions[1].args, [422, 1, 2, 3, 4, 5]);
        assert_eq!(trigger.actions[0].kind, Coded::Known(ActionKind::GoToZone));
        assert_eq!(trigger.actions[0].args, [5, 6, 7, 8, 9]);
        assert_eq!(trigger.actions[0].text, None);
    }

    #[test]
    fn action_text_follows_fixed_block() {
        let mut blob = 0u16.to_le_bytes().to_vec();
        blob.extend(2u16.to_le_bytes());
        blob.extend(action(0x04, [0; 5], "Hello there"));
        blob.extend(action(0x09, [30, 0, 0, 0, 0], ""));

        let trigger = decode_trigger(&mut Reader::new(&blob)).unwrap();
        assert!(trigger.conditions.is_empty());
        assert_eq!(trigger.actions[0].text.as_deref(), Some("Hello there"));
        assert_eq!(trigger.actions[1].kind, Coded::Known(ActionKind::WaitTicks));
        assert_eq!(trigger.actions[1].args[0], 30);
    }

    #[test]
    fn unknown_codes_are_kept() {
        let mut blob = 1u16.to_le_bytes().to_vec();
        blob.extend(condition(0x40, [0; 6]));
        blob.extend(1u16.to_le_bytes());
        blob.extend(action(0x99, [0; 5], ""));

        let trigger = decode_trigger(&mut Reader::new(&blob)).unwrap();
        assert_eq!(trigger.conditions[0].kind, Coded::Unrecognized(0x40));
        assert_eq!(trigger.actions[0].kind, Coded::Unrecognized(0x99));
    }

    #[test]
    fn text_past_end_is_eof() {
        let mut blob = 0u16.to_le_bytes().to_vec();
        blob.extend(1u16.to_le_bytes());
        let mut act = action(0x04, [0; 5], "abc");
        act.truncate(ACTION_HEADER_LEN + 1);
        blob.extend(act);

        let err = decode_trigger(&mut Reader::new(&blob)).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof { offset: 18, .. }));
    }
}
