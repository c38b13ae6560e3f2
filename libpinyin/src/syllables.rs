//! Fixed pinyin tables and the shared default index built from them.

use std::sync::Arc;

use once_cell::sync::Lazy;
use segmenter_core::SyllableIndex;

/// All standard pinyin syllables (without tone markers), grouped by initial.
/// `ü` is spelled `v` (lv, nve), as typed on a Latin keyboard.
pub const PINYIN_SYLLABLES: &[&str] = &[
    // a
    "a", "ai", "an", "ang", "ao",
    // o
    "o", "ou",
    // e
    "e", "ei", "en", "er",
    // b
    "ba", "bai", "ban", "bang", "bao", "bei", "ben", "beng", "bi", "bian", "biao", "bie", "bin",
    "bing", "bo", "bu",
    // p
    "pa", "pai", "pan", "pang", "pao", "pei", "pen", "peng", "pi", "pian", "piao", "pie", "pin",
    "ping", "po", "pou", "pu",
    // m
    "ma", "mai", "man", "mang", "mao", "me", "mei", "men", "meng", "mi", "mian", "miao", "mie",
    "min", "ming", "miu", "mo", "mou", "mu",
    // f
    "fa", "fan", "fang", "fei", "fen", "feng", "fo", "fou", "fu",
    // d
    "da", "dai", "dan", "dang", "dao", "de", "dei", "deng", "di", "dia", "dian", "diao", "die",
    "ding", "diu", "dong", "dou", "du", "duan", "dui", "dun", "duo",
    // t
    "ta", "tai", "tan", "tang", "tao", "te", "teng", "ti", "tian", "tiao", "tie", "ting", "tong",
    "tou", "tu", "tuan", "tui", "tun", "tuo",
    // n
    "na", "nai", "nan", "nang", "nao", "ne", "nei", "nen", "neng", "ng", "ni", "nian", "niang",
    "niao", "nie", "nin", "ning", "niu", "nong", "nou", "nu", "nuan", "nuo", "nv", "nve",
    // l
    "la", "lai", "lan", "lang", "lao", "le", "lei", "leng", "li", "lia", "lian", "liang", "liao",
    "lie", "lin", "ling", "liu", "lo", "long", "lou", "lu", "luan", "lun", "luo", "lv", "lve",
    // g
    "ga", "gai", "gan", "gang", "gao", "ge", "gei", "gen", "geng", "gong", "gou", "gu", "gua",
    "guai", "guan", "guang", "gui", "gun", "guo",
    // k
    "ka", "kai", "kan", "kang", "kao", "ke", "ken", "keng", "kong", "kou", "ku", "kua", "kuai",
    "kuan", "kuang", "kui", "kun", "kuo",
    // h
    "ha", "hai", "han", "hang", "hao", "he", "hei", "hen", "heng", "hong", "hou", "hu", "hua",
    "huai", "huan", "huang", "hui", "hun", "huo",
    // j
    "ji", "jia", "jian", "jiang", "jiao", "jie", "jin", "jing", "jiong", "jiu", "ju", "juan",
    "jue", "jun",
    // q
    "qi", "qia", "qian", "qiang", "qiao", "qie", "qin", "qing", "qiong", "qiu", "qu", "quan",
    "que", "qun",
    // x
    "xi", "xia", "xian", "xiang", "xiao", "xie", "xin", "xing", "xiong", "xiu", "xu", "xuan",
    "xue", "xun",
    // zh
    "zha", "zhai", "zhan", "zhang", "zhao", "zhe", "zhen", "zheng", "zhi", "zhong", "zhou", "zhu",
    "zhua", "zhuai", "zhuan", "zhuang", "zhui", "zhun", "zhuo",
    // ch
    "cha", "chai", "chan", "chang", "chao", "che", "chen", "cheng", "chi", "chong", "chou", "chu",
    "chuai", "chuan", "chuang", "chui", "chun", "chuo",
    // sh
    "sha", "shai", "shan", "shang", "shao", "she", "shei", "shen", "sheng", "shi", "shou", "shu",
    "shua", "shuai", "shuan", "shuang", "shui", "shun", "shuo",
    // r
    "ran", "rang", "rao", "re", "ren", "reng", "ri", "rong", "rou", "ru", "ruan", "rui", "run",
    "ruo",
    // z
    "za", "zai", "zan", "zang", "zao", "ze", "zei", "zen", "zeng", "zi", "zong", "zou", "zu",
    "zuan", "zui", "zun", "zuo",
    // c
    "ca", "cai", "can", "cang", "cao", "ce", "cen", "ceng", "ci", "cong", "cou", "cu", "cuan",
    "cui", "cun", "cuo",
    // s
    "sa", "sai", "san", "sang", "sao", "se", "sen", "seng", "si", "song", "sou", "su", "suan",
    "sui", "sun", "suo",
    // y
    "ya", "yan", "yang", "yao", "ye", "yi", "yin", "ying", "yo", "yong", "you", "yu", "yuan",
    "yue", "yun",
    // w
    "wa", "wai", "wan", "wang", "wei", "wen", "weng", "wo", "wu",
];

/// Initials that may be typed on their own as an abbreviation of any
/// syllable starting with them (`bj` for `bei jing`).
pub const PINYIN_ABBREVIATIONS: &[&str] = &[
    "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "zh", "ch", "sh", "r",
    "z", "c", "s", "y", "w",
];

static DEFAULT_INDEX: Lazy<Arc<SyllableIndex>> =
    Lazy::new(|| Arc::new(SyllableIndex::new(PINYIN_SYLLABLES, PINYIN_ABBREVIATIONS)));

/// The process-wide index over `PINYIN_SYLLABLES` and `PINYIN_ABBREVIATIONS`.
///
/// Built on first use and shared read-only afterwards.
pub fn default_index() -> Arc<SyllableIndex> {
    Arc::clone(&DEFAULT_INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_shape() {
        let index = default_index();
        assert_eq!(index.len(), PINYIN_SYLLABLES.len());
        assert_eq!(index.max_key_len(), 6);
        assert!(index.contains("zhuang"));
        assert!(index.contains("ng"));
        assert!(!index.contains("zh"));
    }

    #[test]
    fn abbreviations_are_initials() {
        let index = default_index();
        for abbr in PINYIN_ABBREVIATIONS {
            assert!(index.is_abbreviation(abbr));
            assert!(index.has_extension(abbr), "{} starts no syllable", abbr);
        }
        assert!(!index.is_abbreviation("a"));
    }

    #[test]
    fn default_index_is_shared() {
        assert!(Arc::ptr_eq(&default_index(), &default_index()));
    }
}
