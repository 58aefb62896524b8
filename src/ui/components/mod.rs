pub mod category_list;
pub mod simple_words;
pub mod timer_display;
pub mod word_card;
