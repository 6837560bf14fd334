mod common;
mod consequences;
mod scoring;
mod service;
mod systems;
