//! The transform stack.
//!
//! Transforms are kept in the same decomposed form the sketch manipulates
//! them in: a translation, a rotation, and a scale, accumulated by the
//! respective operations. When a shape is submitted, the decomposed state is
//! replayed onto the backend in the fixed order translate, rotate, scale.

use quickdraw_renderer::{RenderBackend, Vector};

/// How many transforms can be saved at once. Pushes beyond this depth are
/// ignored.
pub const MAX_STACK_DEPTH: usize = 32;

/// A decomposed 2D affine state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
   pub translation: Vector,
   /// Radians.
   pub rotation: f32,
   pub scale: Vector,
}

impl Transform {
   pub const IDENTITY: Transform = Transform {
      translation: Vector::ZERO,
      rotation: 0.0,
      scale: Vector::ONE,
   };

   pub fn is_identity(&self) -> bool {
      *self == Self::IDENTITY
   }

   /// Pushes the backend transform and replays this state onto it. Does
   /// nothing for the identity, so shapes drawn without transforms don't pay
   /// for a stack round-trip.
   pub(crate) fn apply(&self, backend: &mut impl RenderBackend) {
      if self.is_identity() {
         return;
      }
      backend.push_transform();
      if self.translation != Vector::ZERO {
         backend.translate(self.translation);
      }
      if self.rotation != 0.0 {
         backend.rotate(self.rotation);
      }
      if self.scale != Vector::ONE {
         backend.scale(self.scale);
      }
   }

   /// Undoes a previous [`apply`][Self::apply].
   pub(crate) fn restore(&self, backend: &mut impl RenderBackend) {
      if !self.is_identity() {
         backend.pop_transform();
      }
   }
}

impl Default for Transform {
   fn default() -> Self {
      Self::IDENTITY
   }
}

/// A bounded LIFO of saved transforms, plus the working transform itself.
pub struct TransformStack {
   current: Transform,
   saved: heapless::Vec<Transform, MAX_STACK_DEPTH>,
}

impl TransformStack {
   pub fn new() -> Self {
      Self {
         current: Transform::IDENTITY,
         saved: heapless::Vec::new(),
      }
   }

   pub fn current(&self) -> &Transform {
      &self.current
   }

   pub fn depth(&self) -> usize {
      self.saved.len()
   }

   /// Saves the working transform. Ignored once the stack is full.
   pub fn push(&mut self) {
      if self.saved.push(self.current).is_err() {
         log::warn!("transform stack is full (depth {}), push ignored", MAX_STACK_DEPTH);
      }
   }

   /// Restores the most recently saved transform. Ignored when nothing is
   /// saved.
   pub fn pop(&mut self) {
      match self.saved.pop() {
         Some(transform) => self.current = transform,
         None => log::warn!("transform stack is empty, pop ignored"),
      }
   }

   pub fn translate(&mut self, translation: Vector) {
      self.current.translation += translation;
   }

   /// The angle is in radians; angle-mode conversion happens upstream.
   pub fn rotate(&mut self, angle: f32) {
      self.current.rotation += angle;
   }

   pub fn scale(&mut self, scale: Vector) {
      self.current.scale *= scale;
   }
}

impl Default for TransformStack {
   fn default() -> Self {
      Self::new()
   }
}
