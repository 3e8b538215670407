//! The blog posts being migrated.

use studio_core::domain::Post;

fn tags(tags: &[&str]) -> Option<Vec<String>> {
    Some(tags.iter().map(|t| t.to_string()).collect())
}

fn body(markdown: &str) -> String {
    markdown.trim_end().to_string()
}

/// Every post to import, in migration order.
pub fn posts() -> Vec<Post> {
    vec![
        Post {
            slug: "hello-world".to_string(),
            title: "Hello, World!".to_string(),
            description: "Welcome to my corner of the internet. Here's what I'm building and why."
                .to_string(),
            date: "2026-01-07".to_string(),
            tags: tags(&["personal", "meta"]),
            reading_time: Some("3 min read".to_string()),
            draft: Some(false),
            content: body(include_str!("../content/hello-world.md")),
        },
        Post {
            slug: "why-qwik".to_string(),
            title: "Why I Chose Qwik Over Next.js".to_string(),
            description: "A deep dive into resumability, hydration, and why Qwik's approach to JavaScript is revolutionary."
                .to_string(),
            date: "2026-01-06".to_string(),
            tags: tags(&["qwik", "javascript", "frameworks"]),
            reading_time: Some("5 min read".to_string()),
            draft: Some(false),
            content: body(include_str!("../content/why-qwik.md")),
        },
        Post {
            slug: "aws-bedrock-anthropic-troubleshooting".to_string(),
            title: "AWS Bedrock + Anthropic Claude: The Complete Troubleshooting Guide".to_string(),
            description: "Three undocumented gotchas that will save you hours of debugging when setting up Claude models on AWS Bedrock."
                .to_string(),
            date: "2026-01-09".to_string(),
            tags: tags(&["aws", "bedrock", "anthropic", "cloud"]),
            reading_time: Some("8 min read".to_string()),
            draft: Some(true),
            content: body(include_str!("../content/aws-bedrock-anthropic-troubleshooting.md")),
        },
        Post {
            slug: "building-ai-agents-with-opencode".to_string(),
            title: "Building AI Agents with OpenCode and Free LLMs".to_string(),
            description: "How to set up an autonomous AI coding agent using OpenCode, OpenRouter, and completely free language models."
                .to_string(),
            date: "2026-01-09".to_string(),
            tags: tags(&["ai", "opencode", "agents", "cloud"]),
            reading_time: Some("10 min read".to_string()),
            draft: Some(true),
            content: body(include_str!("../content/building-ai-agents-with-opencode.md")),
        },
    ]
}
