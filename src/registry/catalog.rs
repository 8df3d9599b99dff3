//! Built-in provider catalog

use super::{Catalog, NodeShape, NodeTemplate, ResourceType};

// Shape per category: compute boxes, databases cylinders, network ellipses,
// storage folders, integration components, security octagons, the rest notes.
const AWS: &[(&str, &str, NodeShape)] = &[
    ("compute", "ec2", NodeShape::Box),
    ("compute", "ecs", NodeShape::Box),
    ("compute", "ecr", NodeShape::Box),
    ("compute", "fargate", NodeShape::Box),
    ("database", "rds", NodeShape::Cylinder),
    ("database", "elasticache", NodeShape::Cylinder),
    ("network", "elb", NodeShape::Ellipse),
    ("network", "route53", NodeShape::Ellipse),
    ("network", "vpc", NodeShape::Ellipse),
    ("network", "public_subnet", NodeShape::Ellipse),
    ("network", "private_subnet", NodeShape::Ellipse),
    ("network", "client_vpn", NodeShape::Ellipse),
    ("storage", "s3", NodeShape::Folder),
    ("integration", "sqs", NodeShape::Component),
    ("security", "macie", NodeShape::Octagon),
    ("security", "security_hub", NodeShape::Octagon),
    ("security", "iam_access_analyzer", NodeShape::Octagon),
    ("security", "guardduty", NodeShape::Octagon),
    ("security", "certificate_manager", NodeShape::Octagon),
    ("management", "cloudwatch", NodeShape::Note),
    ("management", "cloudwatch_event", NodeShape::Note),
    ("management", "cloudtrail", NodeShape::Note),
    ("management", "config", NodeShape::Note),
    ("general", "users", NodeShape::Box),
    ("general", "internet_gateway", NodeShape::Ellipse),
    ("engagement", "ses", NodeShape::Note),
];

const ONPREM: &[(&str, &str, NodeShape)] = &[
    ("client", "client", NodeShape::Box),
    ("ci", "github_actions", NodeShape::Box),
];

/// Install the built-in providers into a catalog
pub(super) fn install(catalog: &mut Catalog) {
    for (provider, table) in [("aws", AWS), ("onprem", ONPREM)] {
        for &(category, resource, shape) in table {
            let icon = format!("{}/{}/{}", provider, category, resource);
            catalog
                .register(
                    ResourceType::new(provider, category, resource),
                    NodeTemplate::new(shape, category, icon),
                )
                .expect("builtin catalog entries are unique");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_both_providers() {
        let catalog = Catalog::builtin();
        assert!(catalog.contains(&ResourceType::new("aws", "network", "vpc")));
        assert!(catalog.contains(&ResourceType::new("onprem", "ci", "github_actions")));
        assert_eq!(catalog.len(), AWS.len() + ONPREM.len());
    }

    #[test]
    fn test_category_drives_shape_and_fill() {
        let catalog = Catalog::builtin();
        let rds = catalog
            .resolve(&ResourceType::new("aws", "database", "rds"))
            .expect("Should resolve");
        assert_eq!(rds.shape, NodeShape::Cylinder);
        assert_eq!(rds.fill, "database");
        assert_eq!(rds.icon, "aws/database/rds");
    }
}
