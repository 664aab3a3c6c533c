//! 学期平均分与班级排名

use std::collections::BTreeMap;

/// 一个学生在某学期的平均分（未四舍五入）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentAverage {
    pub student_id: i64,
    pub average: f64,
}

/// 算术平均，空集合返回 None
pub fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// 把 (student_id, score) 行汇总成排名表
///
/// 按平均分降序，平均分相同按 student_id 升序；没有成绩的学生不会出现。
pub fn rank_averages(scores: &[(i64, f64)]) -> Vec<StudentAverage> {
    let mut per_student: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for &(student_id, score) in scores {
        per_student.entry(student_id).or_default().push(score);
    }

    let mut ranking: Vec<StudentAverage> = per_student
        .into_iter()
        .filter_map(|(student_id, scores)| {
            mean(&scores).map(|average| StudentAverage {
                student_id,
                average,
            })
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then(a.student_id.cmp(&b.student_id))
    });
    ranking
}

/// 学生在排名表中的位置，从 1 开始
pub fn position_of(ranking: &[StudentAverage], student_id: i64) -> Option<u32> {
    ranking
        .iter()
        .position(|entry| entry.student_id == student_id)
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[80.0, 60.0]), Some(70.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_three_classmates_rank_in_order() {
        let scores = [
            (11, 90.0),
            (12, 70.0),
            (13, 50.0),
            (11, 90.0),
            (12, 70.0),
        ];
        let ranking = rank_averages(&scores);
        assert_eq!(position_of(&ranking, 11), Some(1));
        assert_eq!(position_of(&ranking, 12), Some(2));
        assert_eq!(position_of(&ranking, 13), Some(3));
        // 没有成绩的学生不参与排名
        assert_eq!(position_of(&ranking, 14), None);
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn test_ties_break_by_student_id() {
        let ranking = rank_averages(&[(9, 75.0), (4, 75.0), (7, 80.0)]);
        let order: Vec<i64> = ranking.iter().map(|r| r.student_id).collect();
        assert_eq!(order, vec![7, 4, 9]);
    }

    #[test]
    fn test_ranking_uses_unrounded_average() {
        // 66.666.. 与 66.67 四舍五入后相同，但未舍入时后者更高
        let ranking = rank_averages(&[(1, 100.0), (1, 50.0), (1, 50.0), (2, 66.67)]);
        assert_eq!(ranking[0].student_id, 2);
    }
}
