pub mod corpus;
pub mod document;
pub mod evaluate;
pub mod tfidf;
pub mod token;
