pub mod account;
pub mod feed;
pub mod run;
