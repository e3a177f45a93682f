use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::fs;

use pubmed_corpus::corpus::CorpusLayout;
use pubmed_corpus::count::{count_journal, WhitespaceTokenCounter};
use pubmed_corpus::extract::{extract_journal_names, normalize_doi, PubmedXmlExtractor, RecordExtractor};

fn bench_normalize_doi(c: &mut Criterion) {
    let test_dois = vec![
        "10.1016/j.neuron.2020.01.001",
        "10.1523/JNEUROSCI.1234-05.2005",
        "10.1002/(SICI)1097-4695(199908)40:2<178::AID-NEU5>3.0.CO;2-F",
        "10.1038/s41593-019-0520-2",
    ];

    c.bench_function("normalize_doi", |b| {
        b.iter(|| {
            for doi in &test_dois {
                black_box(normalize_doi(doi));
            }
        })
    });
}

fn bench_pubmed_extraction(c: &mut Criterion) {
    let article = r#"<PubmedArticle><MedlineCitation><Article><Abstract>
        <AbstractText Label="BACKGROUND">Synaptic plasticity underlies learning.</AbstractText>
        <AbstractText Label="RESULTS">Long-term potentiation was observed.</AbstractText>
        </Abstract></Article></MedlineCitation><PubmedData><ArticleIdList>
        <ArticleId IdType="doi">10.1016/j.neuron.2020.01.001</ArticleId></ArticleIdList>
        <ReferenceList><Reference><ArticleId IdType="doi">10.9/x</ArticleId></Reference></ReferenceList>
        </PubmedData></PubmedArticle>"#;
    let document = format!("<PubmedArticleSet>{}</PubmedArticleSet>", article.repeat(200));

    let mut group = c.benchmark_group("pubmed_extraction");
    group.throughput(Throughput::Elements(200));
    group.bench_function("extract_200_articles", |b| {
        b.iter(|| black_box(PubmedXmlExtractor.extract(&document)))
    });
    group.finish();
}

fn bench_journal_names(c: &mut Criterion) {
    let html: String = (0..500)
        .map(|i| format!(r#"<li><a href="/journal/j-{i}">Journal &amp; Review {i}</a></li>"#))
        .collect();

    c.bench_function("extract_journal_names", |b| {
        b.iter(|| black_box(extract_journal_names(&html)))
    });
}

fn bench_count_journal(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let abstracts = dir.path().join("J/abstracts");
    let fulltext = dir.path().join("J/fulltext");
    fs::create_dir_all(&abstracts).unwrap();
    fs::create_dir_all(&fulltext).unwrap();
    for i in 0..500 {
        let record = serde_json::json!({ "text": "word ".repeat(200) }).to_string();
        fs::write(abstracts.join(format!("10-1--{}.json", i)), &record).unwrap();
        if i % 2 == 0 {
            fs::write(fulltext.join(format!("10-1--{}.json", i)), &record).unwrap();
        }
    }
    let layout = CorpusLayout::new(dir.path());

    let mut group = c.benchmark_group("count_journal");
    group.sample_size(20);
    group.bench_function("listing_only", |b| {
        b.iter(|| black_box(count_journal(&layout, "J", None).unwrap()))
    });
    group.bench_function("whitespace_tokens", |b| {
        b.iter(|| black_box(count_journal(&layout, "J", Some(&WhitespaceTokenCounter)).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_doi,
    bench_pubmed_extraction,
    bench_journal_names,
    bench_count_journal,
);
criterion_main!(benches);
