use uischema_ir::InstanceKey;

use crate::{Error, Result};

/// Instantiations currently being composed, outermost first.
#[derive(Debug)]
pub struct Trail {
    stack: Vec<InstanceKey>,
    limit: usize,
}

impl Trail {
    pub fn new(limit: usize) -> Self {
        Self {
            stack: Vec::new(),
            limit,
        }
    }

    pub fn enter(&mut self, key: &InstanceKey) -> Result<()> {
        if let Some(pos) = self.stack.iter().position(|k| k == key) {
            let cycle = self.stack[pos..]
                .iter()
                .chain(std::iter::once(key))
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Box::new(Error::CyclicSupertype { cycle }));
        }
        if self.stack.len() >= self.limit {
            return Err(Box::new(Error::DepthLimit {
                name: key.to_string(),
                limit: self.limit,
            }));
        }
        self.stack.push(key.clone());
        Ok(())
    }

    pub fn exit(&mut self) {
        self.stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
