pub mod mission;
