#[macro_export]
macro_rules! return_if_none {
    ($expr:expr) => {
        match $expr {
            None => return,
            Some(value) => value,
        }
    };
}
