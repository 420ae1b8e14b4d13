//! Errors are passed around as plain strings in this code base. This trait
//! converts foreign error types while attaching a context message.

pub trait ErrorStringExt<T> {
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E: std::fmt::Debug> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|err| format!("{}: {:?}", context, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_prepended() {
        let res: Result<i32, _> = "oh no".parse::<i32>().err_to_string("not a number");
        let msg = res.unwrap_err();
        assert!(msg.starts_with("not a number: "));
    }
}
