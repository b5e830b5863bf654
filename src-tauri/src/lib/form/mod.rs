pub(crate) mod command;
pub(crate) mod helper;
pub(crate) mod typedef;
