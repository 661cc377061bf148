use clap::{Parser, Subcommand};
use portfolio_client::{ConfigUpdate, NewPost, PortfolioClient, PostUpdate, SocialLink, SortOrder};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "Manage portfolio blog posts and site settings")]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in as the admin and cache the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List posts (active only unless --all)
    Posts {
        #[arg(long)]
        all: bool,
        /// newest | oldest; pinned posts come first
        #[arg(long)]
        sort: Option<SortOrder>,
    },
    Post {
        id: Uuid,
    },
    CreatePost {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        pinned: bool,
        #[arg(long)]
        hidden: bool,
    },
    UpdatePost {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        pinned: Option<bool>,
    },
    DeletePost {
        id: Uuid,
    },
    /// Show the site configuration
    Config,
    /// General update; empty values are applied
    SetConfig {
        #[command(flatten)]
        fields: ConfigArgs,
        #[arg(long)]
        resume_url: Option<String>,
        #[arg(long)]
        try_hack_me_id: Option<String>,
        /// name,url,icon; repeat to replace the whole list
        #[arg(long = "social-link", value_parser = parse_social_link)]
        social_links: Vec<SocialLink>,
        #[arg(long, conflicts_with = "social_links")]
        clear_social_links: bool,
    },
    /// SEO update; empty values are ignored
    Seo {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        og_image: Option<String>,
    },
    /// Hero update; empty values are ignored
    Hero {
        #[arg(long)]
        name: Option<String>,
        /// Repeat to replace the whole list
        #[arg(long = "hero-title")]
        titles: Vec<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        profile_image: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct ConfigArgs {
    #[arg(long)]
    seo_title: Option<String>,
    #[arg(long)]
    seo_description: Option<String>,
    #[arg(long)]
    seo_keywords: Option<String>,
    #[arg(long)]
    og_image: Option<String>,
    #[arg(long)]
    hero_name: Option<String>,
    #[arg(long = "hero-title")]
    hero_titles: Vec<String>,
    #[arg(long, conflicts_with = "hero_titles")]
    clear_hero_titles: bool,
    #[arg(long)]
    hero_bio: Option<String>,
    #[arg(long)]
    profile_image: Option<String>,
}

fn parse_social_link(raw: &str) -> Result<SocialLink, String> {
    let mut parts = raw.splitn(3, ',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(url), Some(icon)) => Ok(SocialLink {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        }),
        _ => Err("expected name,url,icon".to_string()),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

/// List argument for the general update: `--clear-*` sends an empty list,
/// no values leaves the field out.
fn list_update<T>(items: Vec<T>, clear: bool) -> Option<Vec<T>> {
    if clear {
        Some(Vec::new())
    } else {
        non_empty(items)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let mut client = PortfolioClient::connect(&args.server)?;

    match args.command {
        Command::Login { email, password } => {
            client.login(&email, &password).await?;
            println!("Successfully logged in!");
        }
        Command::Posts { all, sort } => {
            let posts = if all {
                client.list_all_posts().await?
            } else {
                client.list_posts(sort).await?
            };
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("{post}");
            }
        }
        Command::Post { id } => {
            println!("{}", client.get_post(id).await?);
        }
        Command::CreatePost {
            title,
            url,
            description,
            pinned,
            hidden,
        } => {
            let post = client
                .create_post(&NewPost {
                    title,
                    url,
                    description,
                    is_pinned: pinned.then_some(true),
                    is_active: hidden.then_some(false),
                    ..Default::default()
                })
                .await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::UpdatePost {
            id,
            title,
            url,
            description,
            clear_description,
            active,
            pinned,
        } => {
            let description = if clear_description {
                Some(None)
            } else {
                description.map(Some)
            };
            let post = client
                .update_post(
                    id,
                    &PostUpdate {
                        title,
                        url,
                        description,
                        is_active: active,
                        is_pinned: pinned,
                        ..Default::default()
                    },
                )
                .await?;
            println!("Post updated:\n{post}");
        }
        Command::DeletePost { id } => {
            client.delete_post(id).await?;
            println!("Post deleted!");
        }
        Command::Config => {
            let config = client.get_config().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::SetConfig {
            fields,
            resume_url,
            try_hack_me_id,
            social_links,
            clear_social_links,
        } => {
            let config = client
                .update_config(&ConfigUpdate {
                    seo_title: fields.seo_title,
                    seo_description: fields.seo_description,
                    seo_keywords: fields.seo_keywords,
                    og_image: fields.og_image,
                    hero_name: fields.hero_name,
                    hero_titles: list_update(fields.hero_titles, fields.clear_hero_titles),
                    hero_bio: fields.hero_bio,
                    profile_image: fields.profile_image,
                    resume_url,
                    try_hack_me_id,
                    social_links: list_update(social_links, clear_social_links),
                })
                .await?;
            println!("Configuration updated:\n{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Seo {
            title,
            description,
            keywords,
            og_image,
        } => {
            let config = client
                .update_seo(&ConfigUpdate {
                    seo_title: title,
                    seo_description: description,
                    seo_keywords: keywords,
                    og_image,
                    ..Default::default()
                })
                .await?;
            println!("SEO settings updated:\n{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Hero {
            name,
            titles,
            bio,
            profile_image,
        } => {
            let config = client
                .update_hero(&ConfigUpdate {
                    hero_name: name,
                    hero_titles: non_empty(titles),
                    hero_bio: bio,
                    profile_image,
                    ..Default::default()
                })
                .await?;
            println!("Hero section updated:\n{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
