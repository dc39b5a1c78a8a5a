//! Stencil state with scoped acquisition.
//!
//! Renderers never set stencil state directly. A caller pushes the state a
//! draw group needs with [`StencilStack::scope`]; the returned guard restores the
//! previous state when it goes out of scope, including on early returns.
//!
//! wgpu bakes compare/op/mask into the pipeline, and only the reference value is
//! dynamic. [`StencilState::pipeline_key`] strips the reference so renderers can
//! cache one pipeline per distinct state and call `set_stencil_reference` on the
//! pass.

use std::ops::{Deref, DerefMut};

use wgpu::{CompareFunction, StencilOperation};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StencilState {
    pub enabled: bool,
    pub compare: CompareFunction,
    pub reference: u32,
    pub read_mask: u32,
    pub write_mask: u32,
    /// Applied when both the stencil and depth tests pass.
    pub pass_op: StencilOperation,
}

impl Default for StencilState {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl StencilState {
    /// Stencil test off; the attachment is neither read nor written.
    pub const DISABLED: StencilState = StencilState {
        enabled: false,
        compare: CompareFunction::Always,
        reference: 0,
        read_mask: 0xFF,
        write_mask: 0xFF,
        pass_op: StencilOperation::Keep,
    };

    /// Writes `reference` wherever the geometry is rasterized.
    pub const fn write_reference(reference: u32) -> Self {
        Self {
            enabled: true,
            compare: CompareFunction::Always,
            reference,
            read_mask: 0xFF,
            write_mask: 0xFF,
            pass_op: StencilOperation::Replace,
        }
    }

    /// Passes only where the buffer equals `reference`; leaves the buffer untouched.
    pub const fn masked_equal(reference: u32) -> Self {
        Self {
            enabled: true,
            compare: CompareFunction::Equal,
            reference,
            read_mask: 0xFF,
            write_mask: 0x00,
            pass_op: StencilOperation::Keep,
        }
    }

    pub fn with_reference(mut self, reference: u32) -> Self {
        self.reference = reference;
        self
    }

    /// Pipeline-relevant part of the state (dynamic reference zeroed).
    pub fn pipeline_key(self) -> StencilState {
        if self.enabled {
            self.with_reference(0)
        } else {
            Self::DISABLED
        }
    }

    pub fn to_wgpu(self) -> wgpu::StencilState {
        if !self.enabled {
            return wgpu::StencilState::default();
        }

        let face = wgpu::StencilFaceState {
            compare: self.compare,
            fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::Keep,
            pass_op: self.pass_op,
        };

        wgpu::StencilState {
            front: face,
            back: face,
            read_mask: self.read_mask,
            write_mask: self.write_mask,
        }
    }
}

/// Current stencil state plus the nesting depth of open scopes.
#[derive(Debug, Default)]
pub struct StencilStack {
    current: StencilState,
    depth: usize,
}

impl StencilStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> StencilState {
        self.current
    }

    /// Number of scopes currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Makes `state` current until the returned guard is dropped.
    pub fn scope(&mut self, state: StencilState) -> StencilScope<'_> {
        let previous = std::mem::replace(&mut self.current, state);
        self.depth += 1;
        log::trace!("stencil push {state:?} (depth {})", self.depth);
        StencilScope { stack: self, previous }
    }
}

/// Guard returned by [`StencilStack::scope`].
///
/// Derefs to the stack so scopes can nest.
pub struct StencilScope<'s> {
    stack: &'s mut StencilStack,
    previous: StencilState,
}

impl StencilScope<'_> {
    pub fn state(&self) -> StencilState {
        self.stack.current
    }
}

impl Deref for StencilScope<'_> {
    type Target = StencilStack;

    fn deref(&self) -> &StencilStack {
        self.stack
    }
}

impl DerefMut for StencilScope<'_> {
    fn deref_mut(&mut self) -> &mut StencilStack {
        self.stack
    }
}

impl Drop for StencilScope<'_> {
    fn drop(&mut self) {
        self.stack.current = self.previous;
        self.stack.depth -= 1;
        log::trace!("stencil pop -> {:?} (depth {})", self.previous, self.stack.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_restores_previous_state() {
        let mut stack = StencilStack::new();
        {
            let scope = stack.scope(StencilState::write_reference(2));
            assert_eq!(scope.state(), StencilState::write_reference(2));
            assert_eq!(scope.depth(), 1);
        }
        assert_eq!(stack.current(), StencilState::DISABLED);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut stack = StencilStack::new();
        {
            let mut outer = stack.scope(StencilState::write_reference(2));
            {
                let inner = outer.scope(StencilState::masked_equal(2));
                assert_eq!(inner.state().compare, CompareFunction::Equal);
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.state(), StencilState::write_reference(2));
        }
        assert_eq!(stack.current(), StencilState::DISABLED);
    }

    #[test]
    fn early_return_still_restores() {
        fn gated_draw(stack: &mut StencilStack, fail: bool) -> Result<(), ()> {
            let _scope = stack.scope(StencilState::masked_equal(2));
            if fail {
                return Err(());
            }
            Ok(())
        }

        let mut stack = StencilStack::new();
        assert!(gated_draw(&mut stack, true).is_err());
        assert_eq!(stack.current(), StencilState::DISABLED);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn pipeline_key_ignores_reference() {
        let a = StencilState::masked_equal(2).pipeline_key();
        let b = StencilState::masked_equal(7).pipeline_key();
        assert_eq!(a, b);
        assert_ne!(a, StencilState::write_reference(2).pipeline_key());
    }

    #[test]
    fn masked_equal_never_writes() {
        let s = StencilState::masked_equal(2).to_wgpu();
        assert_eq!(s.write_mask, 0);
        assert_eq!(s.front.compare, CompareFunction::Equal);
        assert_eq!(s.back, s.front);
    }

    #[test]
    fn disabled_state_is_wgpu_default() {
        assert_eq!(StencilState::DISABLED.to_wgpu(), wgpu::StencilState::default());
        assert!(!StencilState::DISABLED.to_wgpu().is_enabled());
    }

    #[test]
    fn write_reference_replaces() {
        let s = StencilState::write_reference(2).to_wgpu();
        assert_eq!(s.front.pass_op, StencilOperation::Replace);
        assert_eq!(s.write_mask, 0xFF);
        assert!(s.is_enabled());
    }
}
