//! Slice registry: a type-erased home for each feature's initialized state.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Feature state that can be shared across request handlers.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// An initialized feature, keyed by the concrete state type.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: std::any::type_name::<T>(), state: Box::new(state) }
    }

    /// Downcasts the stored state.
    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Demo(u8);

    impl FeatureSlice for Demo {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn slice_downcasts_to_its_own_type_only() {
        let slice = InitializedSlice::new(Demo(7));
        assert_eq!(slice.id, TypeId::of::<Demo>());
        assert!(slice.name.ends_with("Demo"));
        assert_eq!(slice.downcast_ref::<Demo>().map(|d| d.0), Some(7));
    }
}
