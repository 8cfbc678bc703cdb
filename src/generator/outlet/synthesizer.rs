use crate::types::CompletedSection;
use crate::utils::text::{first_heading, slugify};

/// 将撰写完成的章节合成为一份Markdown报告
///
/// 章节先按规划序号重排，合成不依赖撰写完成的先后顺序，
/// 相同输入必然产生字节一致的输出。
pub fn synthesize(topic: &str, sections: &[CompletedSection], generated_on: &str) -> String {
    let mut ordered: Vec<&CompletedSection> = sections.iter().collect();
    ordered.sort_by_key(|section| section.index);

    let mut toc = String::from("## Table of Contents\n\n");
    for (i, section) in ordered.iter().enumerate() {
        let position = i + 1;
        let heading =
            first_heading(&section.content).unwrap_or_else(|| format!("Section {}", position));
        toc.push_str(&format!(
            "{}. [{}](#{})\n",
            position,
            heading,
            slugify(&heading)
        ));
    }

    let metadata = format!(
        r#"# Research Report: {topic}
        
*Generated on: {generated_on}*
*Research Sources: Multi-source analysis including web search, Wikipedia, and current news*

---

{toc}

---

"#
    );

    let bodies: Vec<&str> = ordered
        .iter()
        .map(|section| section.content.as_str())
        .collect();
    let mut report = format!("{}{}", metadata, bodies.join("\n\n---\n\n"));

    if !report.to_lowercase().contains("conclusion") {
        report.push_str(&format!(
            r#"
---

## Conclusion

This comprehensive analysis of {topic} provides insights across multiple dimensions, from fundamental concepts to practical applications and future trends. The research combines authoritative sources with current developments to offer a complete perspective on the topic.

Key takeaways include the importance of understanding both theoretical foundations and practical implementation considerations, while staying updated with the rapidly evolving landscape in this domain.

---

*This report was generated using multi-agent research methodology with real-time information gathering and expert analysis.*
"#
        ));
    }

    report
}
