// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::DisplaySequence;
use crate::navigator::{GroupJump, next_group_start};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub cursor: usize,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    MoveCursor(isize),
    JumpFirst,
    JumpLast,
    NextGroup,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    CursorMoved(usize),
    StatusUpdated(String),
    StatusCleared,
}

impl ViewState {
    pub fn dispatch(
        &mut self,
        command: ViewCommand,
        sequence: &DisplaySequence,
    ) -> Vec<ViewEvent> {
        match command {
            ViewCommand::MoveCursor(delta) => {
                let next = if delta.is_negative() {
                    self.cursor.saturating_sub(delta.unsigned_abs())
                } else {
                    self.cursor.saturating_add(delta.unsigned_abs())
                };
                self.move_to(next, sequence)
            }
            ViewCommand::JumpFirst => self.move_to(0, sequence),
            ViewCommand::JumpLast => self.move_to(usize::MAX, sequence),
            ViewCommand::NextGroup => match next_group_start(sequence, self.cursor) {
                GroupJump::Target(index) => self.move_to(index, sequence),
                GroupJump::NoNextGroup => vec![self.set_status("last section")],
            },
            ViewCommand::SetStatus(message) => vec![self.set_status(&message)],
            ViewCommand::ClearStatus => {
                self.status_line = None;
                vec![ViewEvent::StatusCleared]
            }
        }
    }

    pub fn fit_to(&mut self, sequence: &DisplaySequence) {
        self.cursor = self.cursor.min(sequence.len().saturating_sub(1));
    }

    fn move_to(&mut self, index: usize, sequence: &DisplaySequence) -> Vec<ViewEvent> {
        let clamped = index.min(sequence.len().saturating_sub(1));
        if clamped == self.cursor {
            return Vec::new();
        }
        self.cursor = clamped;
        vec![ViewEvent::CursorMoved(clamped)]
    }

    fn set_status(&mut self, message: &str) -> ViewEvent {
        self.status_line = Some(message.to_owned());
        ViewEvent::StatusUpdated(message.to_owned())
    }
}
