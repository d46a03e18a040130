pub mod assembler;
pub mod progress;
