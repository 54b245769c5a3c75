//! Parsing for the controller's `robot_return` strings.
//!
//! Query services answer with a brace-wrapped comma list, e.g. `GetPose`
//! returns `"{-90.0,-300.0,200.0,180.0,0.0,-90.0}"`.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ReplyError {
    #[error("dobot_msgs: reply not brace-wrapped: '{0}'")]
    NotBraceWrapped(String),
    #[error("dobot_msgs: expected {expected} fields, got {got} in '{reply}'")]
    WrongArity {
        expected: usize,
        got: usize,
        reply: String,
    },
    #[error("dobot_msgs: bad number '{0}'")]
    BadNumber(String),
}

/// Extracts the comma-separated numbers of a brace-wrapped reply.
pub fn parse_reply_fields(reply: &str) -> Result<Vec<f64>, ReplyError> {
    let trimmed = reply.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| ReplyError::NotBraceWrapped(reply.to_string()))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<f64>()
                .map_err(|_| ReplyError::BadNumber(field.to_string()))
        })
        .collect()
}

/// Parses a six-component pose reply into `[x, y, z, rx, ry, rz]`.
pub fn parse_pose_reply(reply: &str) -> Result<[f64; 6], ReplyError> {
    let fields = parse_reply_fields(reply)?;
    let got = fields.len();
    fields
        .try_into()
        .map_err(|_| ReplyError::WrongArity {
            expected: 6,
            got,
            reply: reply.to_string(),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_controller_pose_reply() {
        let pose = parse_pose_reply("{-90.0,-300.0,200.0,180.0,0.0,-90.0}").unwrap();
        assert_eq!(pose, [-90.0, -300.0, 200.0, 180.0, 0.0, -90.0]);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let pose = parse_pose_reply("  { 1.5, -2.5 , 3.0, 0.0, 0.0, 0.0 }\n").unwrap();
        assert_eq!(pose[0], 1.5);
        assert_eq!(pose[1], -2.5);
    }

    #[test]
    fn rejects_missing_braces() {
        let err = parse_pose_reply("1.0,2.0,3.0,4.0,5.0,6.0").unwrap_err();
        assert!(matches!(err, ReplyError::NotBraceWrapped(_)));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_pose_reply("{1.0,2.0,3.0}").unwrap_err();
        assert_eq!(
            err,
            ReplyError::WrongArity {
                expected: 6,
                got: 3,
                reply: "{1.0,2.0,3.0}".to_string(),
            }
        );
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_pose_reply("{1.0,2.0,three,4.0,5.0,6.0}").unwrap_err();
        assert_eq!(err, ReplyError::BadNumber("three".to_string()));
    }

    #[test]
    fn empty_braces_give_no_fields() {
        assert_eq!(parse_reply_fields("{}").unwrap(), Vec::<f64>::new());
    }
}
