use crate::{config::CodeGenConfig, log::Logger, symbol::Resolver};

///
/// ProcessContext
///
/// Collaborators shared by every stage of one processing pass.
///

#[derive(Clone, Copy)]
pub struct ProcessContext<'a> {
    pub resolver: &'a dyn Resolver,
    pub logger: &'a dyn Logger,
    pub config: &'a CodeGenConfig,
}

impl<'a> ProcessContext<'a> {
    #[must_use]
    pub const fn new(
        resolver: &'a dyn Resolver,
        logger: &'a dyn Logger,
        config: &'a CodeGenConfig,
    ) -> Self {
        Self {
            resolver,
            logger,
            config,
        }
    }
}
