use crate::schema::Schema;
use std::collections::HashMap;

/// 模型对之间的外键数量
///
/// 维护两种计数：
/// - 有向计数按 (拥有方模型, 被引用模型) 统计，决定是否生成 `RelatedBy` 别名；
/// - 无序计数按 {拥有方模型, 被引用模型} 统计，两个方向的外键合并，决定是否关闭约束。
///
/// 自引用外键在两种计数中都只计入 (M, M) 一次。
#[derive(Debug, Clone, Default)]
pub struct AmbiguityIndex {
    directed: HashMap<(String, String), usize>,
    counts: HashMap<(String, String), usize>,
}

impl AmbiguityIndex {
    pub fn build(schema: &Schema) -> Self {
        let mut directed = HashMap::new();
        let mut counts = HashMap::new();
        for (_, fk) in schema.foreign_keys() {
            if fk.ignored {
                continue;
            }
            let owner = &schema.owner(fk).model_name;
            let referenced = &schema.referenced(fk).model_name;
            *directed
                .entry((owner.clone(), referenced.clone()))
                .or_insert(0) += 1;
            *counts.entry(pair(owner, referenced)).or_insert(0) += 1;
        }
        Self { directed, counts }
    }

    /// 两个模型之间的外键总数，不区分方向
    pub fn count(&self, a: &str, b: &str) -> usize {
        self.counts.get(&pair(a, b)).copied().unwrap_or(0)
    }

    /// `owner` 中指向 `referenced` 的外键数
    pub fn directed_count(&self, owner: &str, referenced: &str) -> usize {
        self.directed
            .get(&(owner.to_string(), referenced.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// 需要关闭约束
    pub fn is_ambiguous(&self, a: &str, b: &str) -> bool {
        self.count(a, b) > 1
    }

    /// 同一方向上有多个外键，需要别名区分
    pub fn needs_alias(&self, owner: &str, referenced: &str) -> bool {
        self.directed_count(owner, referenced) > 1
    }

    /// 存在歧义的模型对
    pub fn ambiguous_pairs(&self) -> Vec<(&str, &str, usize)> {
        let mut pairs: Vec<_> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|((a, b), count)| (a.as_str(), b.as_str(), *count))
            .collect();
        pairs.sort();
        pairs
    }
}

fn pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
