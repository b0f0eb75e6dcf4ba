pub(crate) mod anims;
pub(crate) mod rate;
pub(crate) mod track;
pub(crate) mod updater;
