// Remote classification: a text-generation endpoint asked a yes/no question.
//
// The RemoteClassifier trait is the seam: the HTTP client in `generate` is the
// default implementation, and tests plug in fakes. Whatever happens on the
// wire, a classifier only ever answers with a RemoteVerdict.

pub mod extract;
pub mod generate;
pub mod traits;

pub use generate::GenerateClassifier;
pub use traits::{RemoteClassifier, RemoteError, RemoteVerdict};
