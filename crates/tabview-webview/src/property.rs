//! The observed view properties and how each is read from a view.

use serde_json::Value;

/// A mutable view property mirrored to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservedProperty {
    Loading,
    EstimatedProgress,
    Title,
    Url,
    CanGoBack,
    CanGoForward,
}

/// Anything that can report the six observed values: a native view, or
/// the state a toolkit callback is about to publish.
pub trait PropertySource {
    fn is_loading(&self) -> bool;
    fn estimated_progress(&self) -> f64;
    fn title(&self) -> Option<String>;
    fn url(&self) -> Option<String>;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
}

/// Reads a property from a source. `None` means "suppress".
type Extractor = fn(&dyn PropertySource) -> Option<Value>;

/// Subscription table: one extractor per observed property.
const SUBSCRIPTIONS: [(ObservedProperty, Extractor); 6] = [
    (ObservedProperty::Loading, extract_loading),
    (ObservedProperty::EstimatedProgress, extract_progress),
    (ObservedProperty::Title, extract_title),
    (ObservedProperty::Url, extract_url),
    (ObservedProperty::CanGoBack, extract_can_go_back),
    (ObservedProperty::CanGoForward, extract_can_go_forward),
];

impl ObservedProperty {
    pub const ALL: [ObservedProperty; 6] = [
        Self::Loading,
        Self::EstimatedProgress,
        Self::Title,
        Self::Url,
        Self::CanGoBack,
        Self::CanGoForward,
    ];

    /// Key the toolkit observes.
    pub fn key(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::EstimatedProgress => "estimatedProgress",
            Self::Title => "title",
            Self::Url => "URL",
            Self::CanGoBack => "canGoBack",
            Self::CanGoForward => "canGoForward",
        }
    }

    /// `propName` the host receives.
    pub fn prop_name(self) -> &'static str {
        match self {
            Self::Loading => "isLoading",
            Self::EstimatedProgress => "estimatedProgress",
            Self::Title => "title",
            Self::Url => "url",
            Self::CanGoBack => "canGoBack",
            Self::CanGoForward => "canGoForward",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Value to emit on the observation path, or `None` when the value is
    /// absent or an empty string.
    pub fn observed_value(self, view: &dyn PropertySource) -> Option<Value> {
        SUBSCRIPTIONS
            .iter()
            .find(|(property, _)| *property == self)
            .and_then(|(_, extract)| extract(view))
    }

    /// Current value without suppression; absent strings become `null`.
    pub fn current_value(self, view: &dyn PropertySource) -> Value {
        match self {
            Self::Title => view.title().map(Value::String).unwrap_or(Value::Null),
            Self::Url => view.url().map(Value::String).unwrap_or(Value::Null),
            _ => self.observed_value(view).unwrap_or(Value::Null),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<Value> {
    value.filter(|s| !s.is_empty()).map(Value::String)
}

fn extract_loading(view: &dyn PropertySource) -> Option<Value> {
    Some(Value::Bool(view.is_loading()))
}

fn extract_progress(view: &dyn PropertySource) -> Option<Value> {
    Some(Value::from(view.estimated_progress()))
}

fn extract_title(view: &dyn PropertySource) -> Option<Value> {
    non_empty(view.title())
}

fn extract_url(view: &dyn PropertySource) -> Option<Value> {
    non_empty(view.url())
}

fn extract_can_go_back(view: &dyn PropertySource) -> Option<Value> {
    Some(Value::Bool(view.can_go_back()))
}

fn extract_can_go_forward(view: &dyn PropertySource) -> Option<Value> {
    Some(Value::Bool(view.can_go_forward()))
}
