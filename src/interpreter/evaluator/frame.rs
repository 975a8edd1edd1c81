use std::collections::HashMap;

use crate::{csg::Csg, interpreter::value::core::Value};

/// Name-to-value bindings of one frame level.
pub type Bindings = HashMap<String, Value>;

/// Local bindings of one lexical block within an active call.
#[derive(Debug, Default)]
pub struct BlockFrame {
    label:    &'static str,
    bindings: Bindings,
}

/// Activation record of one module or function invocation.
///
/// The base holds captured enclosing locals and bound parameters. Block
/// frames for the nested blocks currently executing in this call are stacked
/// on top of it, innermost last.
#[derive(Debug, Default)]
pub struct CallFrame {
    label:    String,
    base:     Bindings,
    blocks:   Vec<BlockFrame>,
    children: Vec<Csg>,
}

impl CallFrame {
    /// Creates a frame with the given base bindings.
    #[must_use]
    pub fn new(label: impl Into<String>, base: Bindings) -> Self {
        Self { label: label.into(),
               base,
               ..Self::default() }
    }

    /// Stores the geometry passed to this instantiation, for `children()`.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Csg>) -> Self {
        self.children = children;
        self
    }

    /// Looks through the block frames, innermost first, then the base.
    fn find_deep(&self, name: &str) -> Option<&Value> {
        self.blocks
            .iter()
            .rev()
            .find_map(|block| block.bindings.get(name))
            .or_else(|| self.base.get(name))
    }

    /// Looks only at the base.
    fn find_shallow(&self, name: &str) -> Option<&Value> {
        self.base.get(name)
    }
}

/// The stack of active calls of one evaluation run.
///
/// Lookup follows a hybrid rule. The top call is searched deeply: its block
/// frames and its base. Older calls are searched deeply only for names
/// starting with `$`; for any other name only their base is visible. The
/// first binding found wins, even if it is Undefined, and a name bound
/// nowhere is Undefined.
///
/// # Example
/// ```
/// use solidscript::interpreter::{
///     evaluator::frame::{Bindings, CallFrame, CallStack},
///     value::core::Value,
/// };
///
/// let mut stack = CallStack::default();
/// stack.push_call(CallFrame::new("root", Bindings::new()));
/// stack.push_block("for");
/// stack.bind("i", Value::Number(1.0));
/// stack.bind("$c", Value::Number(2.0));
/// stack.push_call(CallFrame::new("m", Bindings::new()));
///
/// assert_eq!(stack.lookup("i"), Value::Undefined);
/// assert_eq!(stack.lookup("$c"), Value::Number(2.0));
/// ```
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
}

impl CallStack {
    /// Resolves `name` under the hybrid lookup rule.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Value {
        let mut frames = self.frames.iter().rev();
        let Some(top) = frames.next() else {
            return Value::Undefined;
        };
        if let Some(value) = top.find_deep(name) {
            return value.clone();
        }

        let sigil = name.starts_with('$');
        frames.find_map(|frame| {
                  if sigil {
                      frame.find_deep(name)
                  } else {
                      frame.find_shallow(name)
                  }
              })
              .cloned()
              .unwrap_or_default()
    }

    /// Pushes a call frame.
    pub fn push_call(&mut self, frame: CallFrame) {
        tracing::trace!("push call frame '{}' (depth {})", frame.label, self.frames.len() + 1);
        self.frames.push(frame);
    }

    /// Pops the top call frame.
    pub fn pop_call(&mut self) -> Option<CallFrame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            tracing::trace!("pop call frame '{}'", frame.label);
        }
        frame
    }

    /// Pushes an empty block frame onto the top call.
    pub fn push_block(&mut self, label: &'static str) {
        if let Some(top) = self.frames.last_mut() {
            tracing::trace!("push block frame '{label}' in '{}'", top.label);
            top.blocks.push(BlockFrame { label,
                                         bindings: Bindings::new() });
        }
    }

    /// Pops the innermost block frame of the top call.
    pub fn pop_block(&mut self) {
        if let Some(block) = self.frames.last_mut().and_then(|top| top.blocks.pop()) {
            tracing::trace!("pop block frame '{}'", block.label);
        }
    }

    /// Binds `name` in the innermost block frame of the top call, or in its
    /// base when no block is open.
    pub fn bind(&mut self, name: &str, value: Value) {
        let Some(top) = self.frames.last_mut() else {
            return;
        };
        let level = match top.blocks.last_mut() {
            Some(block) => &mut block.bindings,
            None => &mut top.base,
        };
        level.insert(name.to_string(), value);
    }

    /// Replaces the value of `name` at the innermost level of the top call
    /// that binds it; binds it at the innermost level otherwise.
    pub fn assign(&mut self, name: &str, value: Value) {
        let Some(top) = self.frames.last_mut() else {
            return;
        };
        if let Some(bindings) = top.blocks
                                   .iter_mut()
                                   .rev()
                                   .map(|block| &mut block.bindings)
                                   .find(|bindings| bindings.contains_key(name))
        {
            bindings.insert(name.to_string(), value);
            return;
        }
        match top.blocks.last_mut() {
            Some(block) if !top.base.contains_key(name) => {
                block.bindings.insert(name.to_string(), value);
            },
            _ => {
                top.base.insert(name.to_string(), value);
            },
        }
    }

    /// Geometry passed to the instantiation that called the top frame.
    ///
    /// Used by the `children` built-in, whose own frame is on top.
    #[must_use]
    pub fn caller_children(&self) -> &[Csg] {
        self.frames
            .len()
            .checked_sub(2)
            .and_then(|i| self.frames.get(i))
            .map(|frame| frame.children.as_slice())
            .unwrap_or_default()
    }
}
