mod isolation_group;
mod m3db_cluster;

pub use isolation_group::*;
pub use m3db_cluster::*;
