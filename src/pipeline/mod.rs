// Multi-comment workflows built on top of the moderation engine.

pub mod batch;
