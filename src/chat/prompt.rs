//! Prompt assembly for the completion request.

use super::{ConversationTurn, Role};
use crate::error::{LektorError, Result};

/// Assemble the augmented prompt for the completion service.
///
/// The system instruction goes first, historical turns keep their order and
/// roles untouched, and the latest turn's content is re-emitted as a new
/// final user turn with the retrieved context appended.
pub fn assemble(
    system_instruction: &str,
    conversation: &[ConversationTurn],
    context: &str,
) -> Result<Vec<ConversationTurn>> {
    let Some((latest, history)) = conversation.split_last() else {
        return Err(LektorError::MalformedRequest(
            "Conversation must contain at least one turn".to_string(),
        ));
    };

    let mut prompt = Vec::with_capacity(conversation.len() + 1);
    prompt.push(ConversationTurn::new(Role::System, system_instruction));
    prompt.extend_from_slice(history);
    prompt.push(ConversationTurn::new(
        Role::User,
        format!("{}\n\n{}", latest.content, context),
    ));

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = "You are a professor finder.";

    fn turn(role: Role, content: &str) -> ConversationTurn {
        ConversationTurn::new(role, content)
    }

    #[test]
    fn test_assemble_invariants() {
        let conversation = vec![
            turn(Role::User, "Who teaches algorithms well?"),
            turn(Role::Assistant, "Dr. Ada is highly rated."),
            turn(Role::User, "What about systems?"),
        ];

        let prompt = assemble(SYSTEM, &conversation, "CONTEXT BLOCK").unwrap();

        assert_eq!(prompt.len(), 4);
        assert_eq!(prompt[0].role, Role::System);
        assert_eq!(prompt[0].content, SYSTEM);

        // History preserved verbatim, roles untouched.
        assert_eq!(prompt[1], conversation[0]);
        assert_eq!(prompt[2], conversation[1]);

        // Final turn is a fresh user turn carrying the context.
        let last = prompt.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.starts_with("What about systems?"));
        assert!(last.content.ends_with("CONTEXT BLOCK"));
    }

    #[test]
    fn test_assemble_single_turn_conversation() {
        let conversation = vec![turn(Role::User, "Best physics professor?")];
        let prompt = assemble(SYSTEM, &conversation, "ctx").unwrap();

        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0].role, Role::System);
        assert_eq!(prompt[1].role, Role::User);
        assert!(prompt[1].content.contains("Best physics professor?"));
        assert!(prompt[1].content.contains("ctx"));
    }

    #[test]
    fn test_assemble_empty_conversation_is_malformed() {
        let result = assemble(SYSTEM, &[], "ctx");
        assert!(matches!(result, Err(LektorError::MalformedRequest(_))));
    }

    #[test]
    fn test_assemble_does_not_alter_history_roles() {
        let conversation = vec![
            turn(Role::Assistant, "Earlier answer"),
            turn(Role::User, "Follow-up"),
        ];

        let prompt = assemble(SYSTEM, &conversation, "ctx").unwrap();
        assert_eq!(prompt[1].role, Role::Assistant);
        assert_eq!(prompt[1].content, "Earlier answer");
    }
}
