mod db;
pub(crate) mod fakes;
