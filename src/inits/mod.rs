pub(crate) mod firstk;
