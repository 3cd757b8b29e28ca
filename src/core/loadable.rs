//! Loading / error / success state for one remote list.
//!
//! A failed fetch leaves `loading == false`, `data` empty and the message in
//! `error`, so screens can draw an error panel instead of crashing. There is
//! no automatic retry; `start()` again to refetch.

#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub loading: bool,
    pub data: Vec<T>,
    pub error: Option<String>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: Vec::new(),
            error: None,
        }
    }
}

impl<T> Loadable<T> {
    /// Mark a fetch as in flight. Previous data stays visible until it lands.
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish<E: ToString>(&mut self, result: Result<Vec<T>, E>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(e) => {
                self.data = Vec::new();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_sets_loading_and_clears_error() {
        let mut l: Loadable<u8> = Loadable {
            loading: false,
            data: vec![1],
            error: Some("old".into()),
        };
        l.start();
        assert!(l.loading);
        assert_eq!(l.error, None);
        assert_eq!(l.data, vec![1]);
    }

    #[test]
    fn test_failure_clears_data_and_keeps_message() {
        let mut l: Loadable<u8> = Loadable::default();
        l.start();
        l.finish(Ok::<_, String>(vec![1, 2]));
        l.start();
        l.finish(Err::<Vec<u8>, _>("network error: refused"));
        assert!(!l.loading);
        assert!(l.is_empty());
        assert_eq!(l.error.as_deref(), Some("network error: refused"));
    }
}
