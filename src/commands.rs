//! CLI command implementations

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use simplyfi_ai::{ExplainConfig, Explainer};
use simplyfi_core::{to_dot, Graph, Language};
use simplyfi_flow::{build_flowchart, build_syntax_tree};
use simplyfi_server::{ServerConfig, ServerState, SimplyfiServer};

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Graphviz source
    Dot,
    /// Nodes and edges as JSON
    Json,
    /// Labels along the path from Start, one per line
    Chain,
}

pub async fn serve(config: AppConfig, host: Option<String>, port: Option<u16>, open: bool) -> anyhow::Result<()> {
    let server_config = ServerConfig {
        host: host.unwrap_or(config.server.host.clone()),
        port: port.unwrap_or(config.server.port),
    };

    let explainer = Explainer::from_config(&serve_explain_config(&config))
        .context("failed to set up the explanation provider")?;

    let server = SimplyfiServer::new(ServerState::new(explainer), server_config);
    let listener = server.bind().await?;
    let url = format!("http://{}", listener.local_addr()?);

    if open {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Could not open browser at {}: {}", url, e);
        }
    }

    server.serve(listener).await
}

pub fn flowchart(file: Option<&Path>, language: &str, format: OutputFormat) -> anyhow::Result<()> {
    let language: Language = language.parse()?;
    let code = read_input(file)?;
    let graph = build_flowchart(&code, language);
    print_graph(&graph, format)
}

pub fn syntax_tree(file: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let code = read_input(file)?;
    let graph = build_syntax_tree(&code)?;
    print_graph(&graph, format)
}

pub async fn explain(config: AppConfig, file: Option<&Path>, prompt: Option<&str>) -> anyhow::Result<()> {
    let code = read_input(file)?;
    let explainer = Explainer::from_config(&config.explain_config())
        .context("failed to set up the explanation provider")?;

    let explanation = explainer.explain(&code, prompt).await?;
    println!("{}", explanation.text);
    Ok(())
}

pub fn highlight(file: Option<&Path>, language: &str) -> anyhow::Result<()> {
    let language: Language = language.parse()?;
    let code = read_input(file)?;
    let highlighter = simplyfi_server::Highlighter::new();
    print!("{}", highlighter.highlight_html(&code, language));
    Ok(())
}

/// Explanation settings for `serve`. A remote provider without a key falls
/// back to the offline one so the diagrams keep working.
fn serve_explain_config(config: &AppConfig) -> ExplainConfig {
    let explain_config = config.explain_config();
    let has_key = explain_config
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());

    if explain_config.provider.needs_credential() && !has_key {
        tracing::warn!(
            "No API key for {}; explanations will use the offline provider",
            explain_config.provider
        );
        return ExplainConfig::local();
    }
    explain_config
}

/// Read a file, or stdin when the path is absent or "-".
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("failed to read stdin")?;
            Ok(code)
        }
    }
}

fn render(graph: &Graph, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Dot => to_dot(graph),
        OutputFormat::Json => serde_json::to_string_pretty(&graph.to_data())?,
        OutputFormat::Chain => {
            let labels = graph.chain_labels();
            if labels.is_empty() {
                // trees have no Start node; list every label instead
                graph.labels().join("\n")
            } else {
                labels.join("\n")
            }
        }
    })
}

fn print_graph(graph: &Graph, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(graph, format)?.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplyfi_ai::ProviderKind;

    #[test]
    fn test_render_chain() {
        let graph = build_flowchart("# one\ndef two():", Language::Python);
        assert_eq!(render(&graph, OutputFormat::Chain).unwrap(), "Start\none\ntwo\nEnd");
    }

    #[test]
    fn test_render_tree_chain_lists_labels() {
        let graph = build_syntax_tree("x = 1").unwrap();
        let text = render(&graph, OutputFormat::Chain).unwrap();
        assert!(text.starts_with("module\n"));
    }

    #[test]
    fn test_render_json() {
        let graph = build_flowchart("", Language::Java);
        let text = render(&graph, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], "Java flowchart");
        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_serve_falls_back_without_key() {
        let mut config = AppConfig::default();
        assert_eq!(serve_explain_config(&config).provider, ProviderKind::Local);

        config.ai.api_key = Some("  ".to_string());
        assert_eq!(serve_explain_config(&config).provider, ProviderKind::Local);

        config.ai.api_key = Some("key".to_string());
        let resolved = serve_explain_config(&config);
        assert_eq!(resolved.provider, ProviderKind::Gemini);
        assert_eq!(resolved.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.py");
        std::fs::write(&path, "print(1)\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "print(1)\n");
        assert!(read_input(Some(&dir.path().join("missing.py"))).is_err());
    }
}
