//! Context formatting for retrieved review items.
//!
//! Pure and deterministic: the same items always render to the same text.

use crate::vector_store::RetrievedItem;

/// Header preceding the rendered items, so the model knows the block was
/// injected by retrieval rather than typed by the student.
const CONTEXT_HEADER: &str = "Returned results from vector db (done automatically):";

/// Line emitted when retrieval found nothing, so the model is told explicitly
/// instead of being left to infer it from an empty block.
const NO_RESULTS: &str = "No matching professor reviews were found.";

/// Render retrieved items into a single prompt-ready text block.
///
/// Items are rendered in input order (already similarity-ranked) with a fixed
/// field order: professor, review, subject, stars.
pub fn format_context(items: &[RetrievedItem]) -> String {
    if items.is_empty() {
        return format!("{}\n{}\n", CONTEXT_HEADER, NO_RESULTS);
    }

    let blocks = items
        .iter()
        .map(|item| {
            format!(
                "Professor: {}\nReview: {}\nSubject: {}\nStars: {}",
                item.id,
                item.field("review"),
                item.field("subject"),
                item.field("stars"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}\n", CONTEXT_HEADER, blocks)
}
