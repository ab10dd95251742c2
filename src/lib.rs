// Library exports for partner-clusters
pub mod cluster;
pub mod error;
pub mod input;
pub mod union_find;

pub use cluster::{largest_partner_cluster_product, ClusterReport, RestaurantGroups};
pub use error::ClusterError;
