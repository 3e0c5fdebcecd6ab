//! Transcript layout and rendering benchmarks
//!
//! Measures pagination of large models on a recording surface, and the full
//! render into a tagged PDF.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use skilltree_transcript::{
    BadgeAchievement, ExportConfig, LabelConfiguration, LayoutContext, ProgressTotals,
    RecordingSurface, SkillProgress, SubjectProgress, TranscriptExporter, TranscriptModel,
    TranscriptPaginator,
};
use std::hint::black_box;

fn totals(user_points: u64, total_points: u64) -> ProgressTotals {
    ProgressTotals {
        user_level: 1,
        total_levels: 5,
        user_points,
        total_points,
    }
}

/// `subjects` subjects of `skills` skills each, every third skill completed.
fn model(subjects: usize, skills: usize) -> TranscriptModel {
    let subject_list: Vec<SubjectProgress> = (1..=subjects)
        .map(|s| {
            let skill_list: Vec<SkillProgress> = (1..=skills)
                .map(|k| {
                    let earned = if k % 3 == 0 { 100 } else { 0 };
                    SkillProgress::new(format!("Subject {} Skill {}", s, k), earned, 100)
                        .with_skill_id(format!("skill{}_{}", s, k))
                })
                .collect();
            let earned = skill_list.iter().map(|k| k.user_points()).sum();
            SubjectProgress::new(
                format!("Subject {}", s),
                totals(earned, skills as u64 * 100),
                skill_list,
            )
            .with_subject_id(format!("subj{}", s))
        })
        .collect();
    let earned = subject_list.iter().map(|s| s.user_points()).sum();
    let total = subject_list.iter().map(|s| s.total_points()).sum();
    let badges = (1..=20)
        .map(|b| BadgeAchievement::new(format!("Badge {}", b), None))
        .collect();

    TranscriptModel::new(
        "Joe Doe (joe)",
        "Benchmark Project",
        totals(earned, total),
        LabelConfiguration::default(),
        subject_list,
        badges,
    )
}

fn benchmark_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_recording");
    let config = ExportConfig::default();

    for skills in [10, 100, 1000] {
        let model = model(10, skills);
        group.bench_with_input(BenchmarkId::new("skills_per_subject", skills), &model, |b, model| {
            b.iter(|| {
                let mut surface = RecordingSurface::new(config.layout.page_size());
                let mut ctx = LayoutContext::new(&mut surface, &config.layout);
                TranscriptPaginator::new(model, config.document_options())
                    .paginate(&mut ctx)
                    .expect("Failed to paginate");
                black_box(ctx.page_count())
            });
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pdf");
    let exporter = TranscriptExporter::new(ExportConfig::default());

    for subjects in [1, 10, 50] {
        let model = model(subjects, 50);
        group.bench_with_input(BenchmarkId::new("subjects", subjects), &model, |b, model| {
            b.iter(|| {
                let pdf = exporter.render(model).expect("Failed to render PDF");
                black_box(pdf.bytes.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pagination, benchmark_render);
criterion_main!(benches);
