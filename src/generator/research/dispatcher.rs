use std::collections::HashSet;

use crate::types::{ResearchQuery, SectionPlan};

/// 将章节规划展开为研究查询队列
///
/// 按规划中的章节顺序展开全部查询，重复查询只保留首次出现的那条；
/// 随后按优先级稳定降序排序，优先级相同时维持规划顺序；
/// 最终截断到 max_queries 上限。
pub fn build_query_queue(plan: &SectionPlan, max_queries: usize) -> Vec<ResearchQuery> {
    let mut seen = HashSet::new();
    let mut queue = Vec::new();

    for section in &plan.sections {
        for query in &section.research_queries {
            if seen.insert(query.query.clone()) {
                queue.push(query.clone());
            }
        }
    }

    // sort_by 是稳定排序，同优先级的查询保持展开顺序
    queue.sort_by(|a, b| b.priority.cmp(&a.priority));
    queue.truncate(max_queries);
    queue
}
