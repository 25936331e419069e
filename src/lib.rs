// commentgate: comment moderation for a public comment box.
//
// This is the library root. Text canonicalization and lexical matching are
// pure; the remote classifier is the only component that does I/O. The
// moderation module ties them together behind one decision call.

pub mod config;
pub mod lexical;
pub mod moderation;
pub mod output;
pub mod pipeline;
pub mod remote;
pub mod status;
pub mod text;
