#![cfg(test)]

pub mod helpers;
