pub mod completion;
pub mod scrape;
pub mod session;
pub mod validate;
