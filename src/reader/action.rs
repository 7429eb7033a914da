/*
** This file is a part of Xmlstream (streaming XML writer and reader)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlstream is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::AttributeMap;
use crate::TagName;

use super::XmlHandler;

/// A recorded handler callback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// A [start_tag()](XmlHandler::start_tag) call.
    TagStart {
        name: TagName,
        attributes: AttributeMap,
    },

    /// A [tag_data()](XmlHandler::tag_data) call.
    TagData { name: TagName, value: String },

    /// An [end_tag()](XmlHandler::end_tag) call.
    TagEnd { name: TagName },
}

impl Action {
    /// Name of the tag the callback was made for.
    pub fn name(&self) -> &str {
        match self {
            Action::TagStart { name, .. } => name,
            Action::TagData { name, .. } => name,
            Action::TagEnd { name } => name,
        }
    }

    /// Makes the same call on the given handler.
    pub fn replay<H: XmlHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            Action::TagStart { name, attributes } => handler.start_tag(name, attributes),
            Action::TagData { name, value } => handler.tag_data(name, value),
            Action::TagEnd { name } => handler.end_tag(name),
        }
    }
}

/// Ordered list of recorded callbacks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> ActionLog {
        ActionLog {
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Makes all recorded calls on the handler in the recorded order.
    pub fn replay<H: XmlHandler + ?Sized>(&self, handler: &mut H) {
        for action in &self.actions {
            action.replay(handler);
        }
    }
}

/// Records the calls instead of handling them.
impl XmlHandler for ActionLog {
    fn start_tag(&mut self, name: &str, attributes: &AttributeMap) {
        self.push(Action::TagStart {
            name: name.to_string(),
            attributes: attributes.clone(),
        });
    }

    fn end_tag(&mut self, name: &str) {
        self.push(Action::TagEnd {
            name: name.to_string(),
        });
    }

    fn tag_data(&mut self, name: &str, value: &str) {
        self.push(Action::TagData {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}
