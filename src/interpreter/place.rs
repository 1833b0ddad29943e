//! Assignable locations.
//!
//! Assignment and the increment operators resolve their target once into
//! a [`Place`], then read and write through it, so the receiver and index
//! expressions are evaluated a single time.

use std::rc::Rc;

use talon_ast::{Expr, IndexExpr, MemberExpr};
use talon_core::{NativeError, RuntimeError, Span};
use talon_registry::builtins::checked_index;
use talon_registry::{ClassDescriptor, ClassTable, MapKey, NativePayload, Object, Value};

use super::Interpreter;

/// A resolved assignment target.
#[derive(Debug)]
pub(super) enum Place<'ast> {
    Local(&'ast str),
    Field(Rc<Object<'ast>>, &'ast str),
    Static(Rc<ClassDescriptor<'ast>>, &'ast str),
    ListSlot(Rc<Object<'ast>>, usize, Span),
    MapEntry(Rc<Object<'ast>>, Value<'ast>),
}

/// Value of instance field `name`. A field the class declares but the
/// instance never received (query rows carry only selected columns)
/// reads as `null`.
pub(super) fn read_field<'ast>(
    object: &Object<'ast>,
    name: &str,
    classes: &ClassTable<'ast>,
) -> Option<Value<'ast>> {
    object.get_field(name).or_else(|| {
        object
            .class()
            .find_instance_field(name, classes)
            .map(|_| Value::Null)
    })
}

fn has_field<'ast>(object: &Object<'ast>, name: &str, classes: &ClassTable<'ast>) -> bool {
    object.has_field(name) || object.class().find_instance_field(name, classes).is_some()
}

/// Position named by a list index: an Integer, or a String holding one.
fn list_position(key: &Value<'_>, span: Span) -> Result<i64, RuntimeError> {
    if let Some(position) = key.as_integer() {
        return Ok(position);
    }
    let Some(text) = key.as_string() else {
        return Err(NativeError::ArgumentType {
            index: 0,
            expected: "Integer",
        }
        .into());
    };
    match text.trim().parse::<i64>() {
        Ok(position) => Ok(position),
        Err(_) => Err(RuntimeError::InvalidListIndex { key: text, span }),
    }
}

impl<'r, 'ast> Interpreter<'r, 'ast> {
    pub(super) fn place(&mut self, expr: &Expr<'ast>) -> Result<Place<'ast>, RuntimeError> {
        match expr {
            Expr::Ident(ident) => self.name_place(ident.name),
            Expr::Member(member) => self.member_place(member),
            Expr::Index(index) => self.index_place(index),
            other => Err(RuntimeError::NotAssignable { span: other.span() }),
        }
    }

    /// A bare name: local, then field of `this`, then static field.
    fn name_place(&self, name: &'ast str) -> Result<Place<'ast>, RuntimeError> {
        let frame = self.frame()?;
        if frame.is_local(name) {
            return Ok(Place::Local(name));
        }
        if let Some(this) = &frame.this
            && has_field(this, name, self.classes)
        {
            return Ok(Place::Field(Rc::clone(this), name));
        }
        if frame.class.find_static_field(name, self.classes).is_some() {
            return Ok(Place::Static(Rc::clone(&frame.class), name));
        }
        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
        })
    }

    fn member_place(&mut self, member: &MemberExpr<'ast>) -> Result<Place<'ast>, RuntimeError> {
        let name = member.member.name;
        if let Some(class) = self.class_ref(member.object) {
            if class.find_static_field(name, self.classes).is_some() {
                return Ok(Place::Static(class, name));
            }
            return Err(RuntimeError::UndefinedField {
                class: class.name.clone(),
                name: name.to_string(),
            });
        }

        let Value::Object(object) = self.eval(member.object)? else {
            return Err(RuntimeError::NullReference { span: member.span });
        };
        if has_field(&object, name, self.classes) {
            return Ok(Place::Field(object, name));
        }
        let class = Rc::clone(object.class());
        if class.find_static_field(name, self.classes).is_some() {
            return Ok(Place::Static(class, name));
        }
        Err(RuntimeError::UndefinedField {
            class: class.name.clone(),
            name: name.to_string(),
        })
    }

    fn index_place(&mut self, index: &IndexExpr<'ast>) -> Result<Place<'ast>, RuntimeError> {
        let collection = self.eval(index.object)?;
        let key = self.eval(index.index)?;
        let Value::Object(object) = collection else {
            return Err(RuntimeError::NullReference { span: index.span });
        };

        let len = match &*object.payload() {
            NativePayload::List(items) => Some(items.len()),
            NativePayload::Map(_) => None,
            _ => return Err(object.payload_mismatch("List").into()),
        };
        let Some(len) = len else {
            return Ok(Place::MapEntry(object, key));
        };

        if key.is_null() {
            return Err(RuntimeError::NullReference {
                span: index.index.span(),
            });
        }
        let position = list_position(&key, index.index.span())?;
        let slot = checked_index(position, len).map_err(|_| RuntimeError::IndexOutOfBounds {
            index: position,
            len,
            span: index.span,
        })?;
        Ok(Place::ListSlot(object, slot, index.span))
    }

    pub(super) fn load(&mut self, place: &Place<'ast>) -> Result<Value<'ast>, RuntimeError> {
        match place {
            Place::Local(name) => self
                .frame()?
                .lookup(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.to_string(),
                }),
            Place::Field(object, name) => {
                Ok(read_field(object, name, self.classes).unwrap_or_default())
            }
            Place::Static(class, name) => Ok(self.static_value(class, name)?.unwrap_or_default()),
            Place::ListSlot(object, slot, _) => {
                Ok(object.list()?.get(*slot).cloned().unwrap_or_default())
            }
            Place::MapEntry(object, key) => {
                let key = MapKey::from_value(key)?;
                Ok(object
                    .map()?
                    .get(&key)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default())
            }
        }
    }

    pub(super) fn store(&mut self, place: &Place<'ast>, value: Value<'ast>) -> Result<(), RuntimeError> {
        match place {
            Place::Local(name) => {
                if !self.frame_mut()?.assign(name, value) {
                    return Err(RuntimeError::UndefinedVariable {
                        name: name.to_string(),
                    });
                }
            }
            Place::Field(object, name) => object.set_field(name, value),
            Place::Static(class, name) => {
                self.set_static(class, name, value)?;
            }
            Place::ListSlot(object, slot, span) => {
                let mut items = object.list_mut()?;
                let len = items.len();
                let Some(item) = items.get_mut(*slot) else {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: *slot as i64,
                        len,
                        span: *span,
                    });
                };
                *item = value;
            }
            Place::MapEntry(object, key) => {
                let map_key = MapKey::from_value(key)?;
                object.map_mut()?.insert(map_key, (key.clone(), value));
            }
        }
        Ok(())
    }
}
