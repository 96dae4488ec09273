//! Best-effort structured extraction over a generative model.
//!
//! Every task runs the same pipeline: fill an instruction template with the
//! product label, send it with the inlined photo, unwrap the provider
//! envelope, then normalize (fence stripping + JSON parsing for text, a data
//! URI for images). Provider failures never escape as errors; they come back
//! as an [`Extraction::Fallback`] carrying a value of the success shape.

mod extraction;
mod prompt;
mod sanitize;
mod types;

pub use extraction::{Gateway, PASSTHROUGH_NOTE, TRY_ON_FALLBACK_NOTE};
pub use prompt::{PromptTemplate, SIZE_ESTIMATION_PROMPT, TRY_ON_PROMPT};
pub use sanitize::strip_code_fences;
pub use types::*;
