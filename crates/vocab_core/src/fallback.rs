//! crates/vocab_core/src/fallback.rs
//!
//! The small built-in deck used when the word service cannot be reached,
//! and for guest users who have no remote progress.

use crate::domain::{VerseExample, Word, WordType};

fn example(verse: &str, translation: &str, reference: &str) -> VerseExample {
    VerseExample {
        verse: verse.to_string(),
        translation: translation.to_string(),
        reference: reference.to_string(),
    }
}

fn card(
    id: u32,
    arabic: &str,
    translation: &str,
    transliteration: &str,
    frequency: u32,
    examples: Vec<VerseExample>,
) -> Word {
    Word {
        id,
        arabic: arabic.to_string(),
        translation: translation.to_string(),
        english: None,
        bangla: None,
        transliteration: transliteration.to_string(),
        frequency,
        word_type: WordType::Noun,
        examples: Some(examples),
    }
}

/// Returns the built-in deck. Every card already carries its examples.
pub fn builtin_deck() -> Vec<Word> {
    vec![
        card(
            4,
            "اللَّهِ",
            "Allah",
            "Allāh",
            940,
            vec![
                example(
                    "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
                    "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
                    "1:1",
                ),
                example(
                    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَـٰلَمِينَ",
                    "All praise is due to Allah, Lord of the worlds.",
                    "1:2",
                ),
            ],
        ),
        card(
            1,
            "مِنْ",
            "From",
            "Min",
            1673,
            vec![
                example(
                    "مِن شَرِّ مَا خَلَقَ",
                    "From the evil of that which He created",
                    "113:2",
                ),
                example(
                    "وَمِن شَرِّ غَاسِقٍ إِذَا وَقَبَ",
                    "And from the evil of darkness when it settles",
                    "113:3",
                ),
            ],
        ),
        card(
            17,
            "إِلَى",
            "To",
            "Ilā",
            405,
            vec![
                example(
                    "إِنَّا لِلَّهِ وَإِنَّا إِلَيْهِ رَاجِعُونَ",
                    "Indeed we belong to Allah, and indeed to Him we will return.",
                    "2:156",
                ),
                example(
                    "وَإِلَى ٱللَّهِ تُرْجَعُ ٱلْأُمُورُ",
                    "And to Allah all matters return.",
                    "3:109",
                ),
            ],
        ),
        card(
            9,
            "عَلَى",
            "On",
            "ʿAlā",
            670,
            vec![
                example("عَلَىٰ صِرَاطٍ مُّسْتَقِيمٍ", "On a straight path.", "36:4"),
                example(
                    "وَعَلَى ٱللَّهِ فَلْيَتَوَكَّلِ ٱلْمُؤْمِنُونَ",
                    "And upon Allah let the believers rely.",
                    "3:122",
                ),
            ],
        ),
        card(
            2,
            "فِي",
            "In",
            "Fiy",
            1185,
            vec![
                example("فِي قُلُوبِهِم مَّرَضٌ", "In their hearts is disease", "2:10"),
                example(
                    "لَقَدْ كَانَ لَكُمْ فِي رَسُولِ ٱللَّهِ أُسْوَةٌ حَسَنَةٌ",
                    "There has certainly been for you in the Messenger of Allah an excellent pattern",
                    "33:21",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_deck_is_usable_offline() {
        let deck = builtin_deck();
        assert_eq!(deck.len(), 5);
        assert!(deck.iter().all(|w| w.examples.as_ref().is_some_and(|e| e.len() == 2)));
    }
}
