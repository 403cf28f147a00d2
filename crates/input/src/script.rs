use std::collections::VecDeque;

use crate::action::Action;
use crate::snapshot::InputSnapshot;
use crate::InputSource;

/// Errors from parsing an input script.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScriptError {
    #[error("empty step at position {0}")]
    EmptyStep(usize),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("invalid repeat count `{0}`")]
    InvalidCount(String),
}

/// Replays a fixed sequence of snapshots, then reports no input.
///
/// Script syntax: comma-separated steps, each `action[+action...][*count]`.
/// `idle` holds nothing. Example: `forward+right*30,jump*1,idle*10`.
/// Repeats are stored run-length encoded, so any `usize` count is accepted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    runs: VecDeque<(InputSnapshot, usize)>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            runs: steps.into_iter().map(|s| (s, 1)).collect(),
        }
    }

    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut runs = VecDeque::new();
        for (index, raw) in script.split(',').enumerate() {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(ScriptError::EmptyStep(index));
            }
            let (names, count) = match raw.split_once('*') {
                Some((names, count)) => {
                    let count: usize = count
                        .trim()
                        .parse()
                        .map_err(|_| ScriptError::InvalidCount(count.trim().to_string()))?;
                    (names, count)
                }
                None => (raw, 1),
            };

            let mut snapshot = InputSnapshot::default();
            for name in names.split('+').map(str::trim) {
                if name == "idle" {
                    continue;
                }
                match Action::from_script_name(name) {
                    Some(Action::MoveForward) => snapshot.forward = true,
                    Some(Action::MoveBackward) => snapshot.backward = true,
                    Some(Action::StrafeLeft) => snapshot.left = true,
                    Some(Action::StrafeRight) => snapshot.right = true,
                    Some(Action::Jump) => snapshot.jump = true,
                    Some(Action::Shoot) => snapshot.shoot = true,
                    None => return Err(ScriptError::UnknownAction(name.to_string())),
                }
            }
            if count > 0 {
                runs.push_back((snapshot, count));
            }
        }
        Ok(Self { runs })
    }

    /// Snapshots not yet replayed, saturating at `usize::MAX`.
    pub fn remaining(&self) -> usize {
        self.runs
            .iter()
            .fold(0usize, |total, (_, count)| total.saturating_add(*count))
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> InputSnapshot {
        let Some((snapshot, count)) = self.runs.front_mut() else {
            return InputSnapshot::default();
        };
        let snapshot = *snapshot;
        *count -= 1;
        if *count == 0 {
            self.runs.pop_front();
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_combined_steps_with_counts() {
        let mut s = ScriptedInput::parse("forward+right*2, jump, idle*3").unwrap();
        assert_eq!(s.remaining(), 6);

        let first = s.snapshot();
        assert!(first.forward && first.right && !first.jump);
        s.snapshot();
        assert!(s.snapshot().jump);
        for _ in 0..3 {
            assert_eq!(s.snapshot(), InputSnapshot::default());
        }
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn exhausted_script_reports_no_input() {
        let mut s = ScriptedInput::parse("shoot").unwrap();
        assert!(s.snapshot().shoot);
        assert_eq!(s.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn rejects_unknown_action() {
        let err = ScriptedInput::parse("forward,fly*2").unwrap_err();
        assert_eq!(err, ScriptError::UnknownAction("fly".into()));
    }

    #[test]
    fn rejects_bad_count_and_empty_step() {
        assert_eq!(
            ScriptedInput::parse("jump*x").unwrap_err(),
            ScriptError::InvalidCount("x".into())
        );
        assert_eq!(
            ScriptedInput::parse("jump,,left").unwrap_err(),
            ScriptError::EmptyStep(1)
        );
    }

    #[test]
    fn huge_repeat_count_is_run_length() {
        let mut s = ScriptedInput::parse("jump*18446744073709551615,left").unwrap();
        assert_eq!(s.remaining(), usize::MAX);
        assert!(s.snapshot().jump);
        assert!(s.snapshot().jump);
        assert_eq!(s.remaining(), usize::MAX - 1);
    }

    #[test]
    fn overflowing_count_is_rejected() {
        assert_eq!(
            ScriptedInput::parse("jump*18446744073709551616").unwrap_err(),
            ScriptError::InvalidCount("18446744073709551616".into())
        );
    }

    #[test]
    fn zero_count_contributes_nothing() {
        let s = ScriptedInput::parse("left*0,right").unwrap();
        assert_eq!(s.remaining(), 1);
    }
}
