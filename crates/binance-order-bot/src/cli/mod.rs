/*
[INPUT]:  Terminal interaction helpers for the binary
[OUTPUT]: Prompt implementations and console banners
[POS]:    CLI layer - binary-only modules
[UPDATE]: When adding interactive behaviour
*/

pub mod confirm;
pub mod output;
