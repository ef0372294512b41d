pub mod cli;
pub mod clock;
pub mod fetch;
pub mod input;
pub mod model;
pub mod report;
pub mod run;
