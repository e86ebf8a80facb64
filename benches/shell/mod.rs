pub mod dispatch;
pub mod tokenizer;
