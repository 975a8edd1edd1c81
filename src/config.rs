use clap::ValueEnum;

/// When declared variables receive their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BindingMode {
    /// Every declaration of a block is evaluated once, in declaration order,
    /// when the block is entered. Declaration statements are no-ops at run
    /// time.
    #[default]
    Static,
    /// Declarations start out Undefined when their block is entered and are
    /// assigned when the declaration statement executes.
    Dynamic,
}

/// Whether a callee is a built-in or defined in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalleeClass {
    /// Built-in module or function from the prelude.
    Builtin,
    /// Module or function defined in source.
    User,
}

impl CalleeClass {
    const fn level(self) -> u8 {
        match self {
            Self::Builtin => 1,
            Self::User => 2,
        }
    }
}

/// Controls when an Undefined positional argument is dropped instead of bound.
///
/// A dropped argument leaves its parameter at the default value. Named
/// arguments are always bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UndefinedArgPolicy {
    /// Always bind, even when the argument is Undefined.
    Bind,
    /// Drop Undefined positional arguments to built-in callees.
    #[default]
    ProtectBuiltins,
    /// Drop Undefined positional arguments to every callee.
    ProtectAll,
}

impl UndefinedArgPolicy {
    const fn level(self) -> u8 {
        match self {
            Self::Bind => 0,
            Self::ProtectBuiltins => 1,
            Self::ProtectAll => 2,
        }
    }

    /// Returns `true` if an Undefined positional argument to a callee of
    /// `class` should be dropped.
    ///
    /// ## Example
    /// ```
    /// use solidscript::config::{CalleeClass, UndefinedArgPolicy};
    ///
    /// let policy = UndefinedArgPolicy::ProtectBuiltins;
    /// assert!(policy.protects(CalleeClass::Builtin));
    /// assert!(!policy.protects(CalleeClass::User));
    /// assert!(!UndefinedArgPolicy::Bind.protects(CalleeClass::Builtin));
    /// ```
    #[must_use]
    pub const fn protects(self, class: CalleeClass) -> bool {
        class.level() <= self.level()
    }
}

/// Global evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalConfig {
    /// Static or dynamic binding of declarations.
    pub binding:         BindingMode,
    /// Undefined-argument dropping policy.
    pub undefined_args:  UndefinedArgPolicy,
}

impl EvalConfig {
    /// Returns `true` when declarations are assigned at run time.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.binding == BindingMode::Dynamic
    }
}
