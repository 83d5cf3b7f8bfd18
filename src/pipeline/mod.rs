//! Pipeline stages for resume parsing.
//!
//! Each submodule implements exactly one transformation step, so each is
//! independently testable without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! path ──▶ text ──▶ extractor ──▶ normalize
//! (PDF)   (clean    (LLM JSON     (fixed-shape
//!          string)   guess)        Resume)
//! ```
//!
//! 1. [`text`] — extract and clean the PDF text; runs in `spawn_blocking`
//!    because `pdf-extract` is CPU-bound and synchronous
//! 2. [`crate::extractor`] — the only stage with network I/O
//! 3. [`normalize`] — total coercion of the untrusted JSON guess into a
//!    [`crate::schema::Resume`]; never fails

pub mod normalize;
pub mod text;
