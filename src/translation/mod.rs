/*!
 * Translation orchestration for extracted document text.
 *
 * - `chunk`: splits extracted text into backend-sized pieces without
 *   breaking mid-line
 * - `core`: the `TranslationService`, which resolves the source language
 *   (one detection call when none is given) and translates every chunk in
 *   order through a `TranslationBackend`
 */

pub use self::chunk::chunk_text;
pub use self::core::{TranslationOutcome, TranslationService};

pub mod chunk;
pub mod core;
