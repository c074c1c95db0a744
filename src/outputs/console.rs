use super::notice::{Notice, PipelineError};
use crate::dispatch::DispatchError;

/// Line of console output for a notice, if any.
pub fn render(notice: &Notice) -> Option<String> {
    match notice {
        Notice::History(_) => None,
        Notice::Info { text, .. } => Some(text.clone()),
        Notice::Dispatched { intent, .. } => Some(format!("done ({})", intent)),
        Notice::Failed { error, .. } => Some(match error {
            PipelineError::NotUnderstood | PipelineError::Dispatch(DispatchError::Unsupported(_)) => {
                "Command not understood.".to_string()
            }
            PipelineError::Dispatch(DispatchError::TargetNotFound(name)) => {
                format!("App '{}' not found.", name)
            }
            other => format!("Something went wrong: {}", other),
        }),
    }
}

/// Numbered history listing, most recent first.
pub fn render_history(history: &[String]) -> String {
    history
        .iter()
        .enumerate()
        .map(|(i, cmd)| format!("  {}. {}", i, cmd))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifyError;
    use crate::intent::IntentKind;
    use crate::kernel::event::RequestSeq;

    #[test]
    fn failures_are_human_readable() {
        let missing = Notice::Failed {
            seq: RequestSeq(1),
            error: DispatchError::TargetNotFound("doesnotexist".into()).into(),
        };
        assert_eq!(render(&missing).unwrap(), "App 'doesnotexist' not found.");

        let timeout = Notice::Failed {
            seq: RequestSeq(2),
            error: ClassifyError::Transport("timed out".into()).into(),
        };
        assert!(render(&timeout).unwrap().contains("timed out"));
    }

    #[test]
    fn history_is_silent_and_numbered_on_request() {
        assert_eq!(render(&Notice::History(vec!["a".into()])), None);
        assert_eq!(
            render(&Notice::Dispatched { seq: RequestSeq(1), intent: IntentKind::OpenApp }).unwrap(),
            "done (open_app)"
        );
        assert_eq!(render_history(&["b".into(), "a".into()]), "  0. b\n  1. a");
    }
}
