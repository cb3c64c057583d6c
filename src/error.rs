use std::io;

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while compiling templates or driving a bar.
///
/// Template errors are fatal and abort the operation that triggered the
/// compile. A [`WidgetRender`](Error::WidgetRender) failure is recovered
/// locally: the offending segment renders as the configured placeholder,
/// the render pass completes, and the error is queued for
/// [`Bar::take_render_errors`](crate::Bar::take_render_errors).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unbalanced, nested or empty braces in a widget template
    #[error("malformed template: {0}")]
    MalformedTemplate(String),

    /// A `{tag}` that is neither built-in nor registered
    #[error("unknown widget tag `{{{0}}}`")]
    UnknownTag(String),

    /// A single widget failed to render during a pass
    #[error("widget `{tag}` failed to render")]
    WidgetRender {
        tag: String,
        #[source]
        source: anyhow::Error,
    },

    /// Rejected bar configuration, e.g. a fractional keep policy without
    /// a known maximum
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output sink failure, propagated to the caller without retry
    #[error(transparent)]
    Io(#[from] io::Error),
}
