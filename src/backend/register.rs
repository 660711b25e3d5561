//! Process-wide backend registration.

mod __priv {
    use cfg_if::cfg_if;

    cfg_if! {
        if #[cfg(feature = "async")] {
            pub trait MaybeAsync: crate::backend::r#async::AnyAsyncBackend {}
            impl<B: crate::backend::r#async::AnyAsyncBackend> MaybeAsync for B {}
        } else {
            pub trait MaybeAsync {}
            impl<B> MaybeAsync for B {}
        }
    }

    cfg_if! {
        if #[cfg(feature = "blocking")] {
            pub trait MaybeBlocking: crate::backend::blocking::AnyBlockingBackend {}
            impl<B: crate::backend::blocking::AnyBlockingBackend> MaybeBlocking for B {}
        } else {
            pub trait MaybeBlocking {}
            impl<B> MaybeBlocking for B {}
        }
    }

    /// Union of the backend interfaces required by the enabled features.
    pub trait RegisterBackend: MaybeAsync + MaybeBlocking {}
    impl<B: MaybeAsync + MaybeBlocking> RegisterBackend for B {}
}

use std::sync::OnceLock;

pub use __priv::RegisterBackend;

pub(crate) static BACKEND: OnceLock<Box<dyn RegisterBackend + Send + Sync>> = OnceLock::new();

/// Register the process-wide transport backend.
///
/// Clients built afterwards, including the implicit default client used by
/// the shortcut functions, go through this backend. The backend must
/// implement the interface of every enabled flavor (`blocking`, `async`).
///
/// # Panics
///
/// Panics if a backend has already been registered.
pub fn register_backend(backend: impl RegisterBackend + Send + Sync + 'static) {
    if BACKEND.set(Box::new(backend)).is_err() {
        panic!("fletch backend already registered");
    }
}
