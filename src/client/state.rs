use crate::client::api::Saved;
use crate::client::error::{ClientError, ClientResult};

/// Remote data owned by a view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => Loadable::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Loadable<Vec<T>> {
    /// Loaded successfully but nothing to show
    pub fn is_empty(&self) -> bool {
        self.data().is_some_and(|items| items.is_empty())
    }

    /// Items when loaded, otherwise an empty slice
    pub fn items(&self) -> &[T] {
        self.data().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Notice shown after a mutation: the server's message or the error text
pub fn mutation_notice<T>(result: &ClientResult<Saved<T>>) -> Option<String> {
    match result {
        Ok(saved) => saved.message.clone(),
        Err(e) => Some(e.to_string()),
    }
}
