//! Layout engine handle.
//!
//! [`LayoutEngine`] is the seam between the layout manager and whatever turns
//! a graph document into rendered output. [`Graphviz`] implements it on top of
//! the Graphviz toolchain. The process-wide instance is bootstrapped lazily and
//! at most once through [`EngineCell`].

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec_dot,
};
use log::{debug, info, trace};
use once_cell::sync::OnceCell;

use tracery_core::options::{EngineKind, OutputFormat};

use crate::TraceryError;

/// Document laid out once during bootstrap to prove the engine is usable.
const PROBE_DOCUMENT: &str = "digraph probe {}";

/// Something that can lay out a graph document.
pub trait LayoutEngine {
    /// Lay out `document` with the `engine` algorithm and render it as `format`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::Engine`] if the engine rejects the document or
    /// cannot be run.
    fn layout(
        &self,
        document: &str,
        format: OutputFormat,
        engine: EngineKind,
    ) -> Result<String, TraceryError>;
}

/// A lazily bootstrapped, shareable engine instance.
///
/// Concurrent callers block until the single bootstrap finishes and then all
/// observe the same instance. A failed bootstrap stores nothing, so the next
/// call tries again.
///
/// # Examples
///
/// ```
/// use tracery::engine::EngineCell;
///
/// static ANSWER: EngineCell<u32> = EngineCell::new();
///
/// let first = ANSWER.get_or_bootstrap(|| Ok(42)).unwrap();
/// let second = ANSWER.get_or_bootstrap(|| Ok(7)).unwrap();
/// assert_eq!(*second, 42);
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct EngineCell<E> {
    cell: OnceCell<Arc<E>>,
}

impl<E> EngineCell<E> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the engine, running `bootstrap` if no instance exists yet.
    ///
    /// # Errors
    ///
    /// Propagates the bootstrap error.
    pub fn get_or_bootstrap<F>(&self, bootstrap: F) -> Result<Arc<E>, TraceryError>
    where
        F: FnOnce() -> Result<E, TraceryError>,
    {
        self.cell
            .get_or_try_init(|| bootstrap().map(Arc::new))
            .cloned()
    }

    /// Returns the engine if it has already been bootstrapped.
    pub fn get(&self) -> Option<Arc<E>> {
        self.cell.get().cloned()
    }
}

impl<E> Default for EngineCell<E> {
    fn default() -> Self {
        Self::new()
    }
}

static GRAPHVIZ: EngineCell<Graphviz> = EngineCell::new();

/// Engine handle backed by the Graphviz command-line tools.
///
/// Layouts run the `dot` command resolved from `PATH` at call time, the same
/// lookup bootstrap performs to confirm Graphviz is installed.
#[derive(Debug)]
pub struct Graphviz {
    executable: PathBuf,
}

impl Graphviz {
    /// Returns the process-wide Graphviz handle, bootstrapping it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::Engine`] if Graphviz is not installed or fails
    /// the probe layout.
    pub fn shared() -> Result<Arc<Self>, TraceryError> {
        GRAPHVIZ.get_or_bootstrap(Self::bootstrap)
    }

    /// Checks that `dot` resolves on `PATH` and can lay out a graph.
    ///
    /// Prefer [`Graphviz::shared`], which runs this only once per process.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::Engine`] if Graphviz is not installed or fails
    /// the probe layout.
    pub fn bootstrap() -> Result<Self, TraceryError> {
        let executable = which::which("dot").map_err(|err| {
            TraceryError::Engine(format!(
                "Graphviz `dot` executable not found ({err}). Please install Graphviz and ensure it is in your PATH."
            ))
        })?;
        debug!(path = executable.display().to_string(); "Found Graphviz executable");

        let graphviz = Self { executable };
        graphviz.layout(PROBE_DOCUMENT, OutputFormat::Plain, EngineKind::Dot)?;

        info!("Graphviz engine ready");
        Ok(graphviz)
    }

    /// Returns where `dot` resolved on `PATH` during bootstrap.
    ///
    /// Used for diagnostics only; every layout repeats the `PATH` lookup.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl LayoutEngine for Graphviz {
    fn layout(
        &self,
        document: &str,
        format: OutputFormat,
        engine: EngineKind,
    ) -> Result<String, TraceryError> {
        debug!(format = format.as_str(), engine = engine.as_str(); "Running Graphviz");

        // Engine names are handed to `-K` verbatim
        let args = vec![
            CommandArg::Format(graphviz_format(format)),
            CommandArg::Custom(format!("-K{engine}")),
        ];

        let output = exec_dot(document.to_string(), args)
            .map_err(|err| TraceryError::Engine(err.to_string()))?;
        let output = String::from_utf8(output)
            .map_err(|err| TraceryError::Engine(format!("engine produced invalid UTF-8: {err}")))?;

        trace!(output = output.as_str(); "Graphviz output");
        Ok(output)
    }
}

fn graphviz_format(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Plain => Format::Plain,
        OutputFormat::Dot => Format::Dot,
        OutputFormat::Json => Format::Json,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
        time::Duration,
    };

    use super::*;

    #[test]
    fn test_engine_cell_bootstraps_once_across_threads() {
        let cell: EngineCell<usize> = EngineCell::new();
        let bootstraps = AtomicUsize::new(0);

        let handles: Vec<Arc<usize>> = thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cell.get_or_bootstrap(|| {
                            thread::sleep(Duration::from_millis(20));
                            Ok(bootstraps.fetch_add(1, Ordering::SeqCst))
                        })
                        .unwrap()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(bootstraps.load(Ordering::SeqCst), 1);
        for handle in &handles {
            assert!(Arc::ptr_eq(handle, &handles[0]));
        }
    }

    #[test]
    fn test_engine_cell_retries_after_failed_bootstrap() {
        let cell: EngineCell<&str> = EngineCell::new();

        let err = cell
            .get_or_bootstrap(|| Err(TraceryError::Engine("not installed".to_string())))
            .unwrap_err();
        assert!(matches!(err, TraceryError::Engine(_)));
        assert!(cell.get().is_none());

        let engine = cell.get_or_bootstrap(|| Ok("ready")).unwrap();
        assert_eq!(*engine, "ready");
        assert!(cell.get().is_some());
    }

    #[test]
    fn test_graphviz_format_mapping() {
        assert!(matches!(graphviz_format(OutputFormat::Plain), Format::Plain));
        assert!(matches!(graphviz_format(OutputFormat::Svg), Format::Svg));
    }
}
