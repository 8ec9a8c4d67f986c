/// Data layer: model loading, vocabulary lookup, word groups.
///
/// Architecture:
/// ```text
///  word2vec .bin / .txt          groups.json (optional)
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                  ┌──────────┐
///   │  loader   │                  │  groups   │  built-in or JSON
///   └──────────┘                  └──────────┘
///        │                              │
///        ▼                              │
///   ┌────────────────┐                  │
///   │ EmbeddingModel │ ◄── words ───────┘
///   └────────────────┘
///        │  matrix_for(words) / most_similar(word)
///        ▼
///   figure::draw_words
/// ```

pub mod groups;
pub mod loader;
pub mod model;
