//! Embedded page templates rendered with Tera
//!
//! All templates ship inside the binary; there is no theme directory to
//! resolve at runtime.

use anyhow::Result;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::pipeline::PostView;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Default autoescaping stays on: everything interpolated is
        // CMS-sourced text. The comment embed is the one trusted HTML
        // fragment and is marked `safe` in the template.
        tera.add_raw_templates(vec![
            (
                "layout.html",
                include_str!("spacetraveling/layout.html"),
            ),
            ("index.html", include_str!("spacetraveling/index.html")),
            ("post.html", include_str!("spacetraveling/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the listing page
    pub fn render_index(
        &self,
        config: &SiteConfig,
        posts: &[PostSummary],
        next_page: Option<&str>,
    ) -> Result<String> {
        let mut context = self.base_context(config);
        context.insert("posts", posts);
        context.insert("next_page", &next_page);
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render the post detail page
    pub fn render_post(
        &self,
        config: &SiteConfig,
        view: &PostView,
        comments_script: &str,
    ) -> Result<String> {
        let mut context = self.base_context(config);
        context.insert("view", view);
        context.insert("comments_script", comments_script);
        Ok(self.tera.render("post.html", &context)?)
    }

    fn base_context(&self, config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("site_title", &config.title);
        context.insert("site_language", &config.language);
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, BlockKind, PostDetail, Section};

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.title = "Spacetraveling".to_string();
        config
    }

    fn summary(uid: &str, title: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            first_publication_date: "15 mar 2021".to_string(),
            title: title.to_string(),
            subtitle: "sub".to_string(),
            author: "Ana".to_string(),
        }
    }

    fn view() -> PostView {
        PostView {
            post: PostDetail {
                uid: "um-post".to_string(),
                first_publication_date: None,
                last_publication_date: None,
                title: "Um post".to_string(),
                subtitle: "sub".to_string(),
                banner_url: "https://images.example/banner.png".to_string(),
                author: "Ana".to_string(),
                content: vec![Section {
                    heading: "Capítulo".to_string(),
                    body: vec![
                        Block {
                            text: "um parágrafo".to_string(),
                            kind: BlockKind::Paragraph,
                            spans: Vec::new(),
                        },
                        Block {
                            text: "um item".to_string(),
                            kind: BlockKind::ListItem,
                            spans: Vec::new(),
                        },
                    ],
                }],
            },
            formatted_date: "15 mar 2021".to_string(),
            reading_minutes: 4,
            prev: None,
            next: None,
            edited_on: None,
        }
    }

    #[test]
    fn test_index_lists_posts_and_load_more() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = vec![summary("one", "Primeiro"), summary("two", "Segundo")];
        let html = renderer
            .render_index(&config(), &posts, Some("cursor_A"))
            .unwrap();

        assert!(html.contains(r#"href="/post/one""#));
        assert!(html.contains("Primeiro"));
        assert!(html.contains("Segundo"));
        assert!(html.contains(r#"data-next="cursor_A""#));
        assert!(html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_index_without_cursor_has_no_affordance() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_index(&config(), &[summary("one", "Primeiro")], None)
            .unwrap();
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_post_renders_blocks_by_kind() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_post(&config(), &view(), "<script>c</script>")
            .unwrap();

        assert!(html.contains("<p>um parágrafo</p>"));
        assert!(html.contains("<ul><li>um item</li></ul>"));
        assert!(html.contains("4 min"));
        assert!(html.contains("<script>c</script>"));
        assert!(!html.contains("editado em"));
    }

    #[test]
    fn test_cms_text_is_escaped_on_the_listing() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = vec![summary("one", "<script>alert(1)</script>")];
        let html = renderer.render_index(&config(), &posts, None).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_cms_text_is_escaped_on_the_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut view = view();
        view.post.content[0].body[0].text = "<img src=x onerror=alert(1)>".to_string();
        let html = renderer.render_post(&config(), &view, "").unwrap();

        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x"));
    }

    #[test]
    fn test_comment_embed_is_not_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let script = r#"<script src="https://utteranc.es/client.js" async></script>"#;
        let html = renderer.render_post(&config(), &view(), script).unwrap();
        assert!(html.contains(script));
    }

    #[test]
    fn test_post_renders_edit_marker_and_nav() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut view = view();
        view.edited_on = Some("15 mar 2021".to_string());
        view.prev = Some(crate::content::AdjacentPostRef {
            uid: "anterior".to_string(),
            title: "Anterior".to_string(),
        });
        let html = renderer
            .render_post(&config(), &view, "")
            .unwrap();

        assert!(html.contains("editado em 15 mar 2021"));
        assert!(html.contains(r#"href="/post/anterior""#));
        assert!(html.contains("Post anterior"));
        assert!(!html.contains("Próximo post"));
    }
}
