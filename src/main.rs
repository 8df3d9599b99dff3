//! Cloudsketch CLI
//!
//! Renders the bundled production infrastructure topology to an image.
//!
//! Usage:
//!   cloudsketch [OPTIONS]
//!
//! Options:
//!   -o, --out-dir <DIR>   Output directory (default ".")
//!   -f, --format <FMT>    Output format: png, svg, pdf, jpg
//!   -t, --theme <FILE>    Theme file for colors (TOML format)
//!       --engine <NAME>   Graphviz layout engine (default "dot")
//!       --dot             Print the DOT description instead of rendering

use std::path::PathBuf;

use clap::Parser;

use cloudsketch::{
    Blueprint, Diagram, DiagramConfig, Direction, GraphError, OutputFormat, Renderer, Theme,
};

#[derive(Parser)]
#[command(name = "cloudsketch")]
#[command(about = "Render the production infrastructure topology")]
struct Cli {
    /// Output directory for the rendered image
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output format: png, svg, pdf, jpg
    #[arg(short, long, default_value = "png")]
    format: String,

    /// Theme file for node and cluster colors (TOML format)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Graphviz layout engine
    #[arg(long, default_value = "dot")]
    engine: String,

    /// Print the DOT description instead of rendering
    #[arg(long)]
    dot: bool,
}

fn main() {
    let cli = Cli::parse();

    let format = match cli.format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let theme = match &cli.theme {
        Some(path) => match Theme::from_file(path) {
            Ok(theme) => theme,
            Err(e) => {
                eprintln!("Error loading theme '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Theme::default(),
    };

    let blueprint = match build_topology(format) {
        Ok(blueprint) => blueprint,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let renderer = Renderer::new()
        .with_engine(cli.engine)
        .with_out_dir(cli.out_dir)
        .with_theme(theme);

    if cli.dot {
        print!("{}", renderer.dot_source(&blueprint));
        return;
    }

    match renderer.render(&blueprint) {
        Ok(path) => {
            println!("Diagram generated: {}", path.display());
            print_overview();
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// The production infrastructure topology
fn build_topology(format: OutputFormat) -> Result<Blueprint, GraphError> {
    let config = DiagramConfig::new()
        .with_filename("infrastructure")
        .with_direction(Direction::TopToBottom)
        .with_format(format)
        .with_font_size(16)
        .with_background("white")
        .with_pad(0.5);

    let mut d = Diagram::open("Infrastructure - Production", config)?;

    // External entities
    let users = d.node("aws.general.users", "End Users")?;
    let github = d.node("onprem.ci.github_actions", "GitHub Actions\nCI/CD")?;

    // DNS
    let route53 = d.cluster("DNS & SSL", |d| {
        let route53 = d.node("aws.network.route53", "Route53\nDomain")?;
        d.node("aws.security.certificate_manager", "ACM\nSSL Certificates")?;
        Ok(route53)
    })?;

    d.edge(users).to(route53)?;

    // Networking
    let (igw, public_subnets, private_subnets) = d.cluster("VPC Network", |d| {
        let igw = d.node("aws.general.internet_gateway", "Internet\nGateway")?;

        let public_subnets = d.cluster("Public Subnets", |d| {
            let a = d.node("aws.network.public_subnet", "Public 1a")?;
            let b = d.node("aws.network.public_subnet", "Public 1b")?;
            Ok([a, b])
        })?;

        let private_subnets = d.cluster("Private Subnets", |d| {
            let a = d.node("aws.network.private_subnet", "Private 1a")?;
            let b = d.node("aws.network.private_subnet", "Private 1b")?;
            Ok([a, b])
        })?;

        // Bastion
        d.node("aws.compute.ec2", "Bastion Host")?;

        Ok((igw, public_subnets, private_subnets))
    })?;

    // Load Balancer
    let alb = d.cluster("Load Balancing", |d| {
        d.node("aws.network.elb", "Application\nLoad Balancer")
    })?;

    d.edge(route53).label("HTTPS").to(alb)?;
    d.edge(igw).to(public_subnets)?;

    // Container Registry
    let ecr = d.cluster("Container Registry", |d| {
        d.node("aws.compute.ecr", "ECR\nDocker Images")
    })?;

    d.edge(github).label("push images").to(ecr)?;

    // ECS Compute
    let (web_service, queue_worker, scheduler, meilisearch) =
        d.cluster("ECS Fargate Compute", |d| {
            d.node("aws.compute.ecs", "ECS Cluster")?;

            let web = d.cluster("Web Service", |d| {
                d.node("aws.compute.fargate", "Web\nLaravel App\nAuto-scaling")
            })?;
            let worker = d.cluster("Queue Workers", |d| {
                d.node("aws.compute.fargate", "Queue Worker\nAsync Jobs")
            })?;
            let scheduler = d.cluster("Scheduler", |d| {
                d.node("aws.compute.fargate", "Scheduler\nCron Jobs")
            })?;
            let meilisearch = d.cluster("Search", |d| {
                d.node("aws.compute.fargate", "Meilisearch\nFull-text Search")
            })?;

            Ok((web, worker, scheduler, meilisearch))
        })?;

    d.edge(alb).label("HTTP").to(web_service)?;
    d.edge(ecr)
        .label("pull")
        .to([web_service, queue_worker, scheduler, meilisearch])?;

    // Data Layer
    let (rds_primary, rds_replica, redis) = d.cluster("Database & Cache", |d| {
        let (primary, replica) = d.cluster("RDS MySQL", |d| {
            let primary = d.node("aws.database.rds", "Primary DB\nMulti-AZ")?;
            let replica = d.node("aws.database.rds", "Read Replica")?;
            d.edge(primary).label("replication").dashed().with(replica)?;
            Ok((primary, replica))
        })?;

        let redis = d.node("aws.database.elasticache", "Redis\nCache & Sessions")?;
        Ok((primary, replica, redis))
    })?;

    d.edge(web_service).label("read/write").to(rds_primary)?;
    d.edge(web_service).label("read").to(rds_replica)?;
    d.edge(web_service).label("cache").to(redis)?;
    d.edge(queue_worker).to(rds_primary)?;
    d.edge(scheduler).to(rds_primary)?;

    // Messaging
    let sqs_main = d.cluster("Message Queues", |d| {
        let main = d.node("aws.integration.sqs", "Main Queue")?;
        let dlq = d.node("aws.integration.sqs", "Dead Letter\nQueue")?;
        d.edge(main).label("failed").dashed().to(dlq)?;
        Ok(main)
    })?;

    d.edge(web_service).label("enqueue").to(sqs_main)?;
    d.edge(queue_worker).label("process").to(sqs_main)?;

    // Storage
    let (s3_app, s3_logs, s3_cloudtrail, s3_config, s3_vpc_flow, s3_macie) =
        d.cluster("S3 Storage", |d| {
            let app = d.node("aws.storage.s3", "Application\nFilesystem\n(KMS encrypted)")?;
            let logs = d.node("aws.storage.s3", "ALB Logs")?;
            let cloudtrail = d.node("aws.storage.s3", "CloudTrail\nAudit Logs")?;
            let config = d.node("aws.storage.s3", "AWS Config\nCompliance")?;
            let vpc_flow = d.node("aws.storage.s3", "VPC Flow\nLogs")?;
            let macie = d.node("aws.storage.s3", "Macie\nFindings")?;
            Ok((app, logs, cloudtrail, config, vpc_flow, macie))
        })?;

    d.edge(web_service).label("read/write").to(s3_app)?;
    d.edge(alb).label("logs").to(s3_logs)?;

    // Monitoring & Logging
    let (cloudwatch, cloudtrail_svc) = d.cluster("Monitoring & Observability", |d| {
        let cloudwatch = d.node("aws.management.cloudwatch", "CloudWatch\nLogs & Metrics")?;
        let cloudtrail = d.node("aws.management.cloudtrail", "CloudTrail\nAPI Audit")?;

        d.cluster("Alarms", |d| {
            d.node("aws.management.cloudwatch_event", "Health Check\nAlarms")
        })?;

        Ok((cloudwatch, cloudtrail))
    })?;

    d.edge(web_service).label("logs").to(cloudwatch)?;
    d.edge(queue_worker).to(cloudwatch)?;
    d.edge(scheduler).to(cloudwatch)?;
    d.edge(meilisearch).to(cloudwatch)?;
    d.edge(cloudtrail_svc).to(s3_cloudtrail)?;

    // Compliance & Security Services
    let (macie_svc, config_svc, backup_vault, backup_plan, restore_test) =
        d.cluster("Compliance & Security (Production)", |d| {
            let macie = d.cluster("Threat Detection", |d| {
                let macie = d.node("aws.security.macie", "Macie\nPHI/PII Detection")?;
                d.node("aws.security.guardduty", "GuardDuty\nThreat Detection")?;
                Ok(macie)
            })?;

            let config = d.cluster("Compliance Monitoring", |d| {
                d.node("aws.security.security_hub", "Security Hub\nCIS, HIPAA")?;
                let config = d.node("aws.management.config", "AWS Config\nCompliance Rules")?;
                d.node("aws.security.iam_access_analyzer", "IAM Access\nAnalyzer")?;
                Ok(config)
            })?;

            let (vault, plan, restore) = d.cluster("Backup & DR", |d| {
                let vault = d.node("aws.storage.s3", "Backup Vault\n(KMS encrypted)")?;
                let plan =
                    d.node("aws.management.cloudwatch_event", "Backup Plan\nDaily @ 5AM UTC")?;
                let restore =
                    d.node("aws.management.cloudwatch_event", "Restore Test\nWeekly Sundays")?;
                Ok((vault, plan, restore))
            })?;

            Ok((macie, config, vault, plan, restore))
        })?;

    // Macie scanning S3 buckets
    d.edge(macie_svc).label("scan").dashed().to(s3_app)?;
    d.edge(macie_svc).label("scan").dashed().to(s3_logs)?;
    d.edge(macie_svc).label("findings").to(s3_macie)?;

    // Backup relationships
    d.edge(backup_plan).label("backup").to(rds_primary)?;
    d.edge(backup_plan).label("store").to(backup_vault)?;
    d.edge(restore_test).label("test restore").dashed().to(backup_vault)?;

    // Config monitoring
    d.edge(config_svc).label("compliance data").to(s3_config)?;

    // VPC Flow Logs
    d.edge(private_subnets).label("flow logs").to(s3_vpc_flow)?;

    // Email Service
    let ses = d.node("aws.engagement.ses", "SES\nEmail Service")?;
    d.edge(web_service).label("send email").to(ses)?;

    // VPN Access
    let vpn = d.node("aws.network.client_vpn", "Client VPN\nSecure Access")?;
    d.edge(vpn).label("secure access").to(private_subnets)?;

    d.finalize()
}

fn print_overview() {
    println!();
    println!("Infrastructure overview:");
    println!("  Networking: VPC with public/private subnets across 2 AZs");
    println!("  Compute: ECS Fargate (web, queue workers, scheduler, search)");
    println!("  Database: RDS MySQL Multi-AZ with read replica");
    println!("  Cache: ElastiCache Redis");
    println!("  Storage: 6 S3 buckets (app data, logs, compliance)");
    println!("  Security: Bastion host, Client VPN for secure access");
    println!("  Email: SES for transactional emails");
    println!("  Compliance: Macie, GuardDuty, Security Hub, AWS Config");
    println!("  Backup: Daily backups with weekly restore testing");
}
