use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::value::Value;

/// A single lexical scope frame: a name-to-value mapping plus an optional
/// link to the enclosing frame.
///
/// Wrapped in `Rc<RefCell<_>>` by [`Env`] because closures capture their
/// definition-site frame by shared ownership; a frame must stay alive as
/// long as any reachable `Callable` references it, well past the block
/// that created it.
#[derive(Debug)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Env>,
}

/// A shared handle to an [`Environment`]. Cloning an `Env` clones the
/// handle, not the frame.
pub type Env = Rc<RefCell<Environment>>;

impl Environment {
    pub fn global() -> Env {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: None,
        }))
    }

    /// A new child frame, e.g. for a block body or a function call.
    pub fn child(enclosing: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: Some(Rc::clone(enclosing)),
        }))
    }

    /// Unconditionally installs `name` in *this* frame, shadowing any
    /// binding of the same name in an enclosing frame. Redeclaring a
    /// `var` in the same frame is legal and simply overwrites.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Walks the chain looking for `name`, cloning the bound value.
    ///
    /// The original source passed the token rather than `name.lexeme` to
    /// the local-frame lookup, so the local check always missed and only
    /// the enclosing-chain recursion (which used `.lexeme`) ever
    /// succeeded. This implementation looks up the lexeme consistently at
    /// every frame, so a local binding is found in the frame that
    /// actually defines it.
    pub fn get(&self, name: &str, line: usize) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }
        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name, line);
        }
        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }

    /// Walks the chain looking for an existing binding of `name` and
    /// overwrites it in place. Unlike `define`, this fails if `name` is
    /// not already bound anywhere on the chain.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> Result<(), RuntimeError> {
        if self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);
            return Ok(());
        }
        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value, line);
        }
        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn define_then_get_in_same_frame() {
        let global = Environment::global();
        global.borrow_mut().define("a", num(1.0));
        assert_eq!(global.borrow().get("a", 1), Ok(num(1.0)));
    }

    #[test]
    fn get_walks_up_the_chain() {
        let global = Environment::global();
        global.borrow_mut().define("a", num(1.0));
        let block = Environment::child(&global);
        assert_eq!(block.borrow().get("a", 1), Ok(num(1.0)));
    }

    #[test]
    fn child_definition_shadows_parent() {
        let global = Environment::global();
        global.borrow_mut().define("a", num(1.0));
        let block = Environment::child(&global);
        block.borrow_mut().define("a", num(2.0));
        assert_eq!(block.borrow().get("a", 1), Ok(num(2.0)));
        assert_eq!(global.borrow().get("a", 1), Ok(num(1.0)));
    }

    #[test]
    fn get_of_undefined_name_is_a_runtime_error() {
        let global = Environment::global();
        assert_eq!(
            global.borrow().get("missing", 7),
            Err(RuntimeError::UndefinedVariable {
                name: "missing".to_string(),
                line: 7,
            })
        );
    }

    #[test]
    fn assign_requires_prior_definition_somewhere_on_the_chain() {
        let global = Environment::global();
        let block = Environment::child(&global);
        assert!(block.borrow_mut().assign("a", num(1.0), 1).is_err());
    }

    #[test]
    fn assign_from_a_child_frame_mutates_the_parent_binding() {
        let global = Environment::global();
        global.borrow_mut().define("a", num(1.0));
        let block = Environment::child(&global);
        block.borrow_mut().assign("a", num(2.0), 1).unwrap();
        assert_eq!(global.borrow().get("a", 1), Ok(num(2.0)));
    }
}
